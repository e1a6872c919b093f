//! Step catalog: which steps the quiz has, in which order, and what each
//! step requires.

use std::fmt;
use std::str::FromStr;

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::fields::FieldKey;
use super::options::{
    EcommercePriority, ExtraService, OptionView, Reach, ScopePreset, SeoPriority, Tristate,
    UpdateFrequency, YesNo, option_views,
};
use crate::error::CatalogError;

/// The kinds of step a quiz can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    PageScope,
    Seo,
    BusinessProfile,
    Blog,
    Domain,
    Reach,
    Ecommerce,
    Updates,
    CompanyMail,
    Services,
    Contact,
}

/// Extra requirements that apply when a discriminator holds `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub discriminator: FieldKey,
    pub value: &'static str,
    pub required: &'static [FieldKey],
    /// A flag that, when set, waives `required`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waived_by: Option<FieldKey>,
}

impl StepKind {
    pub const ALL: &'static [StepKind] = &[
        Self::PageScope,
        Self::Seo,
        Self::BusinessProfile,
        Self::Blog,
        Self::Domain,
        Self::Reach,
        Self::Ecommerce,
        Self::Updates,
        Self::CompanyMail,
        Self::Services,
        Self::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PageScope => "page_scope",
            Self::Seo => "seo",
            Self::BusinessProfile => "business_profile",
            Self::Blog => "blog",
            Self::Domain => "domain",
            Self::Reach => "reach",
            Self::Ecommerce => "ecommerce",
            Self::Updates => "updates",
            Self::CompanyMail => "company_mail",
            Self::Services => "services",
            Self::Contact => "contact",
        }
    }

    /// Question shown at the top of the step.
    pub fn title(self) -> &'static str {
        match self {
            Self::PageScope => "Hur stor hemsida behöver du?",
            Self::Seo => "Är SEO en viktig del av din tillväxt?",
            Self::BusinessProfile => {
                "Vill du att vi sätter upp och/eller optimerar din Google Business Profile?"
            }
            Self::Blog => "Vill du ha en blogg på din hemsida?",
            Self::Domain => "Har du redan en domän?",
            Self::Reach => "Var finns dina kunder?",
            Self::Ecommerce => "Behöver du e-handel?",
            Self::Updates => "Hur ofta kommer din hemsida behöva uppdateras och underhållas?",
            Self::CompanyMail => "Behöver du företagsmail?",
            Self::Services => "Är du intresserad av våra andra tjänster?",
            Self::Contact => "Grundinformation",
        }
    }

    /// Every key this step writes. A commit clears all of them first, so an
    /// abandoned branch cannot leave values behind.
    pub fn owned_keys(self) -> &'static [FieldKey] {
        use FieldKey::*;
        match self {
            Self::PageScope => &[Scope],
            Self::Seo => &[Seo],
            Self::BusinessProfile => &[BusinessProfile],
            Self::Blog => &[Blog],
            Self::Domain => &[DomainType, DomainName, DomainUnknown],
            Self::Reach => &[Reach],
            Self::Ecommerce => &[Ecommerce, EcommercePriority, ProductCount, ProductType],
            Self::Updates => &[Updates],
            Self::CompanyMail => &[Mail, MailCount, EmailNames],
            Self::Services => &[Services],
            Self::Contact => &[Company, Name, Email, Phone],
        }
    }

    /// Keys that must be answered regardless of branch.
    pub fn required(self) -> &'static [FieldKey] {
        use FieldKey::*;
        match self {
            Self::PageScope => &[Scope],
            Self::Seo => &[Seo],
            Self::BusinessProfile => &[BusinessProfile],
            Self::Blog => &[Blog],
            Self::Domain => &[DomainType],
            Self::Reach => &[Reach],
            Self::Ecommerce => &[Ecommerce],
            Self::Updates => &[Updates],
            Self::CompanyMail => &[Mail],
            Self::Services => &[],
            Self::Contact => &[Company, Name, Email, Phone],
        }
    }

    /// Conditional requirements keyed by a discriminator value.
    pub fn branches(self) -> &'static [Branch] {
        use FieldKey::*;
        match self {
            Self::Domain => &[
                Branch {
                    discriminator: DomainType,
                    value: "yes",
                    required: &[DomainName],
                    waived_by: None,
                },
                Branch {
                    discriminator: DomainType,
                    value: "no",
                    required: &[DomainName],
                    waived_by: Some(DomainUnknown),
                },
            ],
            Self::Ecommerce => &[Branch {
                discriminator: Ecommerce,
                value: "yes",
                required: &[EcommercePriority, ProductCount, ProductType],
                waived_by: None,
            }],
            Self::CompanyMail => &[Branch {
                discriminator: Mail,
                value: "yes",
                required: &[MailCount],
                waived_by: None,
            }],
            _ => &[],
        }
    }

    /// Selectable options of the step's discriminator, if any.
    pub fn options(self) -> Vec<OptionView> {
        match self {
            Self::PageScope => option_views::<ScopePreset>(),
            Self::Seo => option_views::<SeoPriority>(),
            Self::BusinessProfile | Self::Blog => option_views::<Tristate>(),
            Self::Domain | Self::Ecommerce | Self::CompanyMail => option_views::<YesNo>(),
            Self::Reach => option_views::<Reach>(),
            Self::Updates => option_views::<UpdateFrequency>(),
            Self::Services => option_views::<ExtraService>(),
            Self::Contact => Vec::new(),
        }
    }

    /// Options of secondary selectors inside a branch.
    pub fn branch_options(self) -> Vec<OptionView> {
        match self {
            Self::Ecommerce => option_views::<EcommercePriority>(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StepKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownStep(s.to_string()))
    }
}

/// A step at a concrete position in a catalog.
#[derive(Debug, Clone, Serialize)]
pub struct StepDescriptor {
    /// 1-based position.
    pub index: usize,
    pub kind: StepKind,
    pub title: &'static str,
    pub required: &'static [FieldKey],
    pub branches: &'static [Branch],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branch_options: Vec<OptionView>,
}

/// Ordered, non-empty list of steps ending with the contact step.
///
/// Indices are 1..=N by construction, so they are always contiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCatalog {
    steps: Vec<StepKind>,
}

impl StepCatalog {
    pub fn new(steps: Vec<StepKind>) -> Result<Self, CatalogError> {
        let Some(&last) = steps.last() else {
            return Err(CatalogError::Empty);
        };
        for (i, kind) in steps.iter().enumerate() {
            if steps[..i].contains(kind) {
                return Err(CatalogError::Duplicate(*kind));
            }
        }
        if last != StepKind::Contact {
            return Err(CatalogError::ContactNotLast(last));
        }
        Ok(Self { steps })
    }

    /// The ten-step quiz.
    pub fn canonical() -> Self {
        use StepKind::*;
        Self {
            steps: vec![
                PageScope,
                Seo,
                BusinessProfile,
                Domain,
                Reach,
                Ecommerce,
                Updates,
                CompanyMail,
                Services,
                Contact,
            ],
        }
    }

    /// The eleven-step quiz with a blog question after the business profile.
    pub fn with_blog() -> Self {
        use StepKind::*;
        Self {
            steps: vec![
                PageScope,
                Seo,
                BusinessProfile,
                Blog,
                Domain,
                Reach,
                Ecommerce,
                Updates,
                CompanyMail,
                Services,
                Contact,
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Never true for a catalog built through `new`.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self) -> StepKind {
        self.steps[0]
    }

    /// Kind of the step at a 1-based index.
    pub fn kind_at(&self, index: usize) -> Option<StepKind> {
        index.checked_sub(1).and_then(|i| self.steps.get(i)).copied()
    }

    /// 1-based index of `kind`, if the catalog contains it.
    pub fn index_of(&self, kind: StepKind) -> Option<usize> {
        self.steps.iter().position(|k| *k == kind).map(|i| i + 1)
    }

    pub fn kinds(&self) -> &[StepKind] {
        &self.steps
    }

    pub fn descriptors(&self) -> Vec<StepDescriptor> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, kind)| StepDescriptor {
                index: i + 1,
                kind: *kind,
                title: kind.title(),
                required: kind.required(),
                branches: kind.branches(),
                options: kind.options(),
                branch_options: kind.branch_options(),
            })
            .collect()
    }
}

impl Default for StepCatalog {
    fn default() -> Self {
        Self::canonical()
    }
}

impl FromStr for StepCatalog {
    type Err = CatalogError;

    /// Parse a comma-separated list such as `"page_scope,seo,contact"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let steps = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(StepKind::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(steps)
    }
}

impl Serialize for StepCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.descriptors())
    }
}
