//! Domain-name suggestions for visitors who don't have a domain yet.

const CONSTRUCTION: &[&str] = &[
    "bygg",
    "snick",
    "mål",
    "tak",
    "mark",
    "entreprenad",
    "renovering",
    "hus",
    "montage",
];
const BEAUTY: &[&str] = &[
    "frisör", "hair", "salong", "beauty", "hud", "klinik", "dental", "massage", "spa", "naglar",
    "lash",
];
const TECH: &[&str] = &["tech", "data", "it", "web", "app", "code", "soft", "sys", "dev"];
const CONSULTING: &[&str] = &[
    "konsult",
    "jurist",
    "ekonomi",
    "redovisning",
    "advokat",
    "law",
    "finance",
    "consult",
];

/// Keyword families, checked in order; the first family with a hit wins.
const FAMILIES: &[(&[&str], [&str; 5])] = &[
    (
        CONSTRUCTION,
        ["entreprenad", "bygg", "projekt", "service", "gruppen"],
    ),
    (BEAUTY, ["studio", "klink", "beauty", "sthlm", "care"]),
    (TECH, ["lab", "digital", "io", "studio", "solutions"]),
    (
        CONSULTING,
        ["partner", "gruppen", "konsult", "associates", "rådgivning"],
    ),
];

const GENERAL: [&str; 5] = ["group", "ab", "sverige", "hq", "official"];

/// Suggest five `.se` domains built from what the visitor typed.
///
/// Input is lower-cased, whitespace is removed and a trailing `.se` or
/// `.com` is stripped. Inputs shorter than two characters yield nothing.
pub fn suggest_domains(input: &str) -> Vec<String> {
    if input.chars().count() < 2 {
        return Vec::new();
    }

    let mut clean: String = input
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if let Some(stripped) = clean.strip_suffix(".se") {
        clean = stripped.to_string();
    }
    if let Some(stripped) = clean.strip_suffix(".com") {
        clean = stripped.to_string();
    }

    let suffixes = FAMILIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| clean.contains(k)))
        .map(|(_, suffixes)| suffixes)
        .unwrap_or(&GENERAL);

    suffixes.iter().map(|s| format!("{clean}{s}.se")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_has_no_suggestions() {
        assert!(suggest_domains("").is_empty());
        assert!(suggest_domains("a").is_empty());
    }

    #[test]
    fn construction_keywords() {
        let s = suggest_domains("Anderssons Bygg");
        assert_eq!(s.len(), 5);
        assert_eq!(s[0], "anderssonsbyggentreprenad.se");
        assert!(s.contains(&"anderssonsbygggruppen.se".to_string()));
    }

    #[test]
    fn beauty_keywords() {
        let s = suggest_domains("Salong Lisa");
        assert_eq!(s[0], "salonglisastudio.se");
    }

    #[test]
    fn tech_keywords_strip_tld() {
        let s = suggest_domains("nordweb.se");
        assert_eq!(
            s,
            [
                "nordweblab.se",
                "nordwebdigital.se",
                "nordwebio.se",
                "nordwebstudio.se",
                "nordwebsolutions.se"
            ]
        );
    }

    #[test]
    fn consulting_keywords_strip_com() {
        let s = suggest_domains("Berg Juristbyrå.com");
        assert_eq!(s[0], "bergjuristbyråpartner.se");
    }

    #[test]
    fn general_fallback() {
        let s = suggest_domains("Fiskebod");
        assert_eq!(
            s,
            [
                "fiskebodgroup.se",
                "fiskebodab.se",
                "fiskebodsverige.se",
                "fiskebodhq.se",
                "fiskebodofficial.se"
            ]
        );
    }

    #[test]
    fn construction_wins_over_later_families() {
        // "hus" (construction) and "it" (tech) both match
        let s = suggest_domains("husit");
        assert_eq!(s[0], "husitentreprenad.se");
    }
}
