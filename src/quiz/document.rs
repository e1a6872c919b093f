//! Submission document: the plain-text report mailed for each quiz.

use std::fmt::Write as _;

use super::fields::{FieldKey, FieldStore};
use super::options::{AnswerOption, ExtraService, UpdateFrequency};

/// Shown wherever an answer is missing, so every section is always present.
pub const NOT_GIVEN: &str = "Ej angivet";

/// Read-only projection of a completed Field Store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDocument {
    fields: FieldStore,
    subject: String,
    body: String,
}

impl QuizDocument {
    pub fn from_store(store: &FieldStore) -> Self {
        Self {
            fields: store.clone(),
            subject: subject(store),
            body: render(store),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// The submitter's email, used as reply-to.
    pub fn reply_to(&self) -> Option<&str> {
        self.fields.text(FieldKey::Email)
    }

    /// The answers the document was rendered from.
    pub fn fields(&self) -> &FieldStore {
        &self.fields
    }
}

/// Mail subject for a quiz submission.
pub fn subject(store: &FieldStore) -> String {
    format!(
        "Ny Quiz-inlämning: {}",
        store.text(FieldKey::Company).unwrap_or(NOT_GIVEN)
    )
}

/// Render the fixed-section report.
pub fn render(store: &FieldStore) -> String {
    let field = |key| store.display(key).unwrap_or_else(|| NOT_GIVEN.to_string());
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "# Ny Quiz-inlämning från {}", field(FieldKey::Company));
    let _ = writeln!(out);
    let _ = writeln!(out, "## Kontaktuppgifter");
    let _ = writeln!(out, "- **Företag:** {}", field(FieldKey::Company));
    let _ = writeln!(out, "- **Namn:** {}", field(FieldKey::Name));
    let _ = writeln!(out, "- **E-post:** {}", field(FieldKey::Email));
    let _ = writeln!(out, "- **Telefon:** {}", field(FieldKey::Phone));
    separator(&mut out);

    let _ = writeln!(out, "## Webbplatsbehov");
    section(&mut out, "### Storlek", &field(FieldKey::Scope));
    section(&mut out, "### SEO", seo_line(store));
    section(
        &mut out,
        "### Google Business Profile",
        tristate_line(store, FieldKey::BusinessProfile),
    );
    if store.contains(FieldKey::Blog) {
        section(&mut out, "### Blogg", tristate_line(store, FieldKey::Blog));
    }
    section(&mut out, "### Domän", &domain_line(store));
    section(&mut out, "### Räckvidd", &field(FieldKey::Reach));
    separator(&mut out);

    let _ = writeln!(out, "## E-handel");
    let _ = writeln!(out, "{}", ecommerce_block(store));
    separator(&mut out);

    let _ = writeln!(out, "## Uppdateringsbehov");
    let _ = writeln!(out, "{}", updates_line(store));
    separator(&mut out);

    let _ = writeln!(out, "## Företagsmail");
    let _ = writeln!(out, "{}", mail_block(store));
    separator(&mut out);

    let _ = writeln!(out, "## Övriga tjänster");
    let _ = writeln!(out, "{}", services_block(store));

    out
}

fn separator(out: &mut String) {
    out.push_str("\n---\n\n");
}

fn section(out: &mut String, heading: &str, line: &str) {
    let _ = write!(out, "\n{heading}\n{line}\n");
}

fn seo_line(store: &FieldStore) -> &'static str {
    match store.text(FieldKey::Seo) {
        Some("primary") => "Ja, jätte viktigt!",
        Some("complementary") => "Ja, lite viktigt",
        Some("none") => "Nej, inte så viktigt",
        _ => "Vet ej – öppen för förslag",
    }
}

fn tristate_line(store: &FieldStore, key: FieldKey) -> &'static str {
    match store.text(key) {
        Some("yes") => "Ja",
        Some("no") => "Nej",
        _ => "Vet ej – öppen för förslag",
    }
}

fn domain_line(store: &FieldStore) -> String {
    let name = store.text(FieldKey::DomainName).unwrap_or(NOT_GIVEN);
    if store.text(FieldKey::DomainType) == Some("yes") {
        format!("Har domän: {name}")
    } else if store.flag(FieldKey::DomainUnknown) {
        "Behöver hjälp med domänval".to_string()
    } else {
        format!("Önskar domän: {name}")
    }
}

fn ecommerce_block(store: &FieldStore) -> String {
    if store.text(FieldKey::Ecommerce) != Some("yes") {
        return "Nej, behöver inte e-handel".to_string();
    }
    let priority = match store.text(FieldKey::EcommercePriority) {
        Some("essential") => "Väsentligt",
        Some(_) => "En liten del",
        None => NOT_GIVEN,
    };
    let count = store.display(FieldKey::ProductCount);
    let kind = store.display(FieldKey::ProductType);
    format!(
        "**Ja, behöver e-handel**\n- Prioritet: {priority}\n- Antal produkter: {}\n- Produkttyp: {}",
        count.as_deref().unwrap_or(NOT_GIVEN),
        kind.as_deref().unwrap_or(NOT_GIVEN),
    )
}

fn updates_line(store: &FieldStore) -> &'static str {
    store
        .text(FieldKey::Updates)
        .and_then(UpdateFrequency::from_wire)
        .map(UpdateFrequency::label)
        .unwrap_or(NOT_GIVEN)
}

fn mail_block(store: &FieldStore) -> String {
    if store.text(FieldKey::Mail) != Some("yes") {
        return "Nej, behöver inte företagsmail".to_string();
    }
    let names: Vec<&str> = store
        .list(FieldKey::EmailNames)
        .unwrap_or_default()
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect();
    let count = store
        .number(FieldKey::MailCount)
        .map(|n| n as usize)
        .unwrap_or(names.len());

    let mut block = format!("**Ja, behöver {count} e-postkonto(n)**\n");
    if names.is_empty() {
        block.push_str("Inga namn angivna");
    } else {
        let listed: Vec<String> = names
            .iter()
            .enumerate()
            .map(|(i, n)| format!("{}. {n}", i + 1))
            .collect();
        block.push_str(&listed.join("\n"));
    }
    block
}

fn services_block(store: &FieldStore) -> String {
    let services = store.list(FieldKey::Services).unwrap_or_default();
    if services.is_empty() {
        return "Inga övriga tjänster valda".to_string();
    }
    services
        .iter()
        .map(|raw| match ExtraService::from_wire(raw) {
            Some(service) => format!("- {}", service.label()),
            None => format!("- {raw}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_store() -> FieldStore {
        let mut s = FieldStore::new();
        s.set(FieldKey::Scope, "medium");
        s.set(FieldKey::Seo, "primary");
        s.set(FieldKey::BusinessProfile, "yes");
        s.set(FieldKey::DomainType, "yes");
        s.set(FieldKey::DomainName, "example.se");
        s.set(FieldKey::Reach, "Nationellt");
        s.set(FieldKey::Ecommerce, "no");
        s.set(FieldKey::Updates, "occasionally");
        s.set(FieldKey::Mail, "no");
        s.set(FieldKey::Services, Vec::<String>::new());
        s.set(FieldKey::Company, "Acme");
        s.set(FieldKey::Name, "Jane Doe");
        s.set(FieldKey::Email, "jane@acme.se");
        s.set(FieldKey::Phone, "0701234567");
        s
    }

    /// Text between `heading` and the next blank line.
    fn section_of<'a>(body: &'a str, heading: &str) -> &'a str {
        let start = body.find(heading).expect("heading present") + heading.len();
        let rest = body[start..].trim_start_matches('\n');
        let end = rest.find("\n\n").unwrap_or(rest.len());
        rest[..end].trim_end()
    }

    #[test]
    fn scenario_values_land_in_their_sections() {
        let doc = QuizDocument::from_store(&scenario_store());
        let body = doc.body();

        assert!(body.starts_with("# Ny Quiz-inlämning från Acme\n"));
        assert!(body.contains("- **Företag:** Acme"));
        assert!(body.contains("- **Namn:** Jane Doe"));
        assert!(body.contains("- **E-post:** jane@acme.se"));
        assert!(body.contains("- **Telefon:** 0701234567"));
        assert_eq!(section_of(body, "### Storlek"), "medium");
        assert_eq!(section_of(body, "### SEO"), "Ja, jätte viktigt!");
        assert_eq!(section_of(body, "### Google Business Profile"), "Ja");
        assert_eq!(section_of(body, "### Domän"), "Har domän: example.se");
        assert_eq!(section_of(body, "### Räckvidd"), "Nationellt");
        assert_eq!(section_of(body, "## E-handel"), "Nej, behöver inte e-handel");
        assert_eq!(
            section_of(body, "## Uppdateringsbehov"),
            "Ibland, 1-2 gånger i månaden"
        );
        assert_eq!(section_of(body, "## Företagsmail"), "Nej, behöver inte företagsmail");
        assert_eq!(section_of(body, "## Övriga tjänster"), "Inga övriga tjänster valda");

        assert_eq!(doc.subject(), "Ny Quiz-inlämning: Acme");
        assert_eq!(doc.reply_to(), Some("jane@acme.se"));
    }

    #[test]
    fn empty_store_keeps_every_section() {
        let body = render(&FieldStore::new());
        for heading in [
            "## Kontaktuppgifter",
            "### Storlek",
            "### SEO",
            "### Google Business Profile",
            "### Domän",
            "### Räckvidd",
            "## E-handel",
            "## Uppdateringsbehov",
            "## Företagsmail",
            "## Övriga tjänster",
        ] {
            assert!(body.contains(heading), "missing {heading}");
        }
        assert_eq!(section_of(&body, "### Storlek"), NOT_GIVEN);
        assert!(!body.contains("### Blogg"));
        assert_eq!(section_of(&body, "### Domän"), "Önskar domän: Ej angivet");
        assert!(body.contains("- **Telefon:** Ej angivet"));
    }

    #[test]
    fn ecommerce_detail_block() {
        let mut s = scenario_store();
        s.set(FieldKey::Ecommerce, "yes");
        s.set(FieldKey::EcommercePriority, "addon");
        s.set(FieldKey::ProductCount, "10-20 st");
        s.set(FieldKey::ProductType, "Hantverk");
        let body = render(&s);
        assert_eq!(
            section_of(&body, "## E-handel"),
            "**Ja, behöver e-handel**\n- Prioritet: En liten del\n- Antal produkter: 10-20 st\n- Produkttyp: Hantverk"
        );
    }

    #[test]
    fn mail_block_lists_names_in_order() {
        let mut s = scenario_store();
        s.set(FieldKey::Mail, "yes");
        s.set(FieldKey::MailCount, 3u32);
        s.set(
            FieldKey::EmailNames,
            vec!["william".to_string(), "info".to_string(), "faktura".to_string()],
        );
        let body = render(&s);
        assert_eq!(
            section_of(&body, "## Företagsmail"),
            "**Ja, behöver 3 e-postkonto(n)**\n1. william\n2. info\n3. faktura"
        );

        s.set(FieldKey::EmailNames, vec![String::new()]);
        s.set(FieldKey::MailCount, 1u32);
        let body = render(&s);
        assert_eq!(
            section_of(&body, "## Företagsmail"),
            "**Ja, behöver 1 e-postkonto(n)**\nInga namn angivna"
        );
    }

    #[test]
    fn services_map_labels_and_pass_unknown_through() {
        let mut s = scenario_store();
        s.set(
            FieldKey::Services,
            vec![
                "meta_ads".to_string(),
                "video_content".to_string(),
                "seo_audit".to_string(),
            ],
        );
        let body = render(&s);
        assert_eq!(
            section_of(&body, "## Övriga tjänster"),
            "- Meta Ads\n- Videoproduktion & content\n- seo_audit"
        );
    }

    #[test]
    fn domain_variants() {
        let mut s = FieldStore::new();
        s.set(FieldKey::DomainType, "no");
        s.set(FieldKey::DomainUnknown, true);
        assert_eq!(section_of(&render(&s), "### Domän"), "Behöver hjälp med domänval");

        s.clear(FieldKey::DomainUnknown);
        s.set(FieldKey::DomainName, "nymarks.se");
        assert_eq!(section_of(&render(&s), "### Domän"), "Önskar domän: nymarks.se");
    }

    #[test]
    fn seo_and_profile_fall_back_to_open_for_advice() {
        let mut s = FieldStore::new();
        s.set(FieldKey::Seo, "consulting");
        s.set(FieldKey::BusinessProfile, "consulting");
        s.set(FieldKey::Blog, "no");
        let body = render(&s);
        assert_eq!(section_of(&body, "### SEO"), "Vet ej – öppen för förslag");
        assert_eq!(
            section_of(&body, "### Google Business Profile"),
            "Vet ej – öppen för förslag"
        );
        assert_eq!(section_of(&body, "### Blogg"), "Nej");
    }
}
