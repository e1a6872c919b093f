//! Enumerated answers for the quiz steps.
//!
//! Each option has a wire value (what the front-end posts and the Field Store
//! holds) and a Swedish label (what the visitor sees).

use serde::Serialize;

/// A closed set of answers for one quiz question.
pub trait AnswerOption: Copy + Eq + Sized + 'static {
    /// Every option, in display order.
    const ALL: &'static [Self];

    /// Value stored in the Field Store and sent over the wire.
    fn wire(self) -> &'static str;

    /// Label shown next to the option.
    fn label(self) -> &'static str;

    fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|o| o.wire() == value)
    }
}

/// Serializable `{value, label}` pair for the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub value: &'static str,
    pub label: &'static str,
}

/// Every option of `T` as value/label pairs.
pub fn option_views<T: AnswerOption>() -> Vec<OptionView> {
    T::ALL
        .iter()
        .map(|o| OptionView {
            value: o.wire(),
            label: o.label(),
        })
        .collect()
}

/// Page-count presets for the site scope step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopePreset {
    Landing,
    Small,
    Medium,
    Large,
}

impl AnswerOption for ScopePreset {
    const ALL: &'static [Self] = &[Self::Landing, Self::Small, Self::Medium, Self::Large];

    fn wire(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Landing => "Startsida",
            Self::Small => "Liten",
            Self::Medium => "Medelstor",
            Self::Large => "Stor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeoPriority {
    Primary,
    Complementary,
    None,
    Consulting,
}

impl AnswerOption for SeoPriority {
    const ALL: &'static [Self] = &[
        Self::Primary,
        Self::Complementary,
        Self::None,
        Self::Consulting,
    ];

    fn wire(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Complementary => "complementary",
            Self::None => "none",
            Self::Consulting => "consulting",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Primary => "Ja, jätte viktigt!",
            Self::Complementary => "Ja, lite viktigt",
            Self::None => "Nej, inte så viktigt",
            Self::Consulting => "Vet ej – öppen för förslag / rådgivning",
        }
    }
}

/// Yes / no / "open for advice", used by the business profile and blog steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tristate {
    Yes,
    No,
    Consulting,
}

impl AnswerOption for Tristate {
    const ALL: &'static [Self] = &[Self::Yes, Self::No, Self::Consulting];

    fn wire(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Consulting => "consulting",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Yes => "Ja",
            Self::No => "Nej",
            Self::Consulting => "Vet ej - öppen för förslag / rådgivning",
        }
    }
}

/// Plain yes/no discriminator (domain, ecommerce, company mail).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

impl AnswerOption for YesNo {
    const ALL: &'static [Self] = &[Self::Yes, Self::No];

    fn wire(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Yes => "Ja",
            Self::No => "Nej",
        }
    }
}

/// Where the customers are. The wire value is the Swedish word itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reach {
    Local,
    National,
    International,
}

impl AnswerOption for Reach {
    const ALL: &'static [Self] = &[Self::Local, Self::National, Self::International];

    fn wire(self) -> &'static str {
        match self {
            Self::Local => "Lokalt",
            Self::National => "Nationellt",
            Self::International => "Internationellt",
        }
    }

    fn label(self) -> &'static str {
        self.wire()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcommercePriority {
    Essential,
    Addon,
}

impl AnswerOption for EcommercePriority {
    const ALL: &'static [Self] = &[Self::Essential, Self::Addon];

    fn wire(self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Addon => "addon",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Essential => "E-handel är väsentligt för min hemsida",
            Self::Addon => "E-handel är en liten del av min hemsida",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateFrequency {
    Rarely,
    Occasionally,
    Regularly,
}

impl AnswerOption for UpdateFrequency {
    const ALL: &'static [Self] = &[Self::Rarely, Self::Occasionally, Self::Regularly];

    fn wire(self) -> &'static str {
        match self {
            Self::Rarely => "rarely",
            Self::Occasionally => "occasionally",
            Self::Regularly => "regularly",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Rarely => "Sällan, 1-2 gånger per år",
            Self::Occasionally => "Ibland, 1-2 gånger i månaden",
            Self::Regularly => "Ofta, 1-2+ gånger i veckan",
        }
    }
}

/// Additional services offered in the multi-select step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraService {
    GoogleAds,
    MetaAds,
    VideoContent,
}

impl AnswerOption for ExtraService {
    const ALL: &'static [Self] = &[Self::GoogleAds, Self::MetaAds, Self::VideoContent];

    fn wire(self) -> &'static str {
        match self {
            Self::GoogleAds => "google_ads",
            Self::MetaAds => "meta_ads",
            Self::VideoContent => "video_content",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::GoogleAds => "Google Ads",
            Self::MetaAds => "Meta Ads",
            Self::VideoContent => "Videoproduktion & content",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_values_unique<T: AnswerOption>() {
        let mut seen = std::collections::HashSet::new();
        for o in T::ALL {
            assert!(seen.insert(o.wire()), "duplicate wire value {}", o.wire());
        }
    }

    #[test]
    fn from_wire_finds_every_option() {
        for o in SeoPriority::ALL {
            assert_eq!(SeoPriority::from_wire(o.wire()), Some(*o));
        }
        assert_eq!(ScopePreset::from_wire("medium"), Some(ScopePreset::Medium));
        assert_eq!(Reach::from_wire("Nationellt"), Some(Reach::National));
        assert_eq!(ScopePreset::from_wire("huge"), None);
        assert_eq!(YesNo::from_wire(""), None);
    }

    #[test]
    fn wire_values_are_unique_per_question() {
        wire_values_unique::<ScopePreset>();
        wire_values_unique::<SeoPriority>();
        wire_values_unique::<Tristate>();
        wire_values_unique::<Reach>();
        wire_values_unique::<EcommercePriority>();
        wire_values_unique::<UpdateFrequency>();
        wire_values_unique::<ExtraService>();
    }

    #[test]
    fn option_views_keep_display_order() {
        let views = option_views::<UpdateFrequency>();
        let values: Vec<_> = views.iter().map(|v| v.value).collect();
        assert_eq!(values, ["rarely", "occasionally", "regularly"]);
        assert_eq!(views[0].label, "Sällan, 1-2 gånger per år");
    }

    #[test]
    fn reach_label_is_wire_value() {
        for r in Reach::ALL {
            assert_eq!(r.label(), r.wire());
        }
    }
}
