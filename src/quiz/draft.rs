//! Per-step drafts holding the answers of the step being edited.
//!
//! The wizard owns exactly one draft at a time. Edits touch only the draft;
//! the Field Store changes when the draft is committed after validation.

use super::catalog::StepKind;
use super::fields::{FieldKey, FieldStore};
use super::options::{
    AnswerOption, EcommercePriority, ExtraService, Reach, ScopePreset, SeoPriority, Tristate,
    UpdateFrequency, YesNo,
};
use super::suggest::suggest_domains;

/// Upper bound of the page-count slider (shown as "25+").
pub const SLIDER_MAX: u8 = 25;
/// Bounds of the mailbox count selector.
pub const MAIL_COUNT_MIN: usize = 1;
pub const MAIL_COUNT_MAX: usize = 10;

/// Draft for the step currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    PageScope(ScopeDraft),
    Seo(ChoiceDraft<SeoPriority>),
    BusinessProfile(ChoiceDraft<Tristate>),
    Blog(ChoiceDraft<Tristate>),
    Domain(DomainDraft),
    Reach(ChoiceDraft<Reach>),
    Ecommerce(EcommerceDraft),
    Updates(ChoiceDraft<UpdateFrequency>),
    CompanyMail(MailDraft),
    Services(ServicesDraft),
    Contact(ContactDraft),
}

impl Draft {
    /// A blank draft for `kind`.
    pub fn empty(kind: StepKind) -> Self {
        match kind {
            StepKind::PageScope => Self::PageScope(ScopeDraft::default()),
            StepKind::Seo => Self::Seo(ChoiceDraft::default()),
            StepKind::BusinessProfile => Self::BusinessProfile(ChoiceDraft::default()),
            StepKind::Blog => Self::Blog(ChoiceDraft::default()),
            StepKind::Domain => Self::Domain(DomainDraft::default()),
            StepKind::Reach => Self::Reach(ChoiceDraft::default()),
            StepKind::Ecommerce => Self::Ecommerce(EcommerceDraft::default()),
            StepKind::Updates => Self::Updates(ChoiceDraft::default()),
            StepKind::CompanyMail => Self::CompanyMail(MailDraft::default()),
            StepKind::Services => Self::Services(ServicesDraft::default()),
            StepKind::Contact => Self::Contact(ContactDraft::default()),
        }
    }

    /// Rebuild the draft for `kind` from committed values.
    pub fn hydrate(kind: StepKind, store: &FieldStore) -> Self {
        match kind {
            StepKind::PageScope => Self::PageScope(ScopeDraft::hydrate(store)),
            StepKind::Seo => Self::Seo(ChoiceDraft::hydrate(store, FieldKey::Seo)),
            StepKind::BusinessProfile => {
                Self::BusinessProfile(ChoiceDraft::hydrate(store, FieldKey::BusinessProfile))
            }
            StepKind::Blog => Self::Blog(ChoiceDraft::hydrate(store, FieldKey::Blog)),
            StepKind::Domain => Self::Domain(DomainDraft::hydrate(store)),
            StepKind::Reach => Self::Reach(ChoiceDraft::hydrate(store, FieldKey::Reach)),
            StepKind::Ecommerce => Self::Ecommerce(EcommerceDraft::hydrate(store)),
            StepKind::Updates => Self::Updates(ChoiceDraft::hydrate(store, FieldKey::Updates)),
            StepKind::CompanyMail => Self::CompanyMail(MailDraft::hydrate(store)),
            StepKind::Services => Self::Services(ServicesDraft::hydrate(store)),
            StepKind::Contact => Self::Contact(ContactDraft::hydrate(store)),
        }
    }

    pub fn kind(&self) -> StepKind {
        match self {
            Self::PageScope(_) => StepKind::PageScope,
            Self::Seo(_) => StepKind::Seo,
            Self::BusinessProfile(_) => StepKind::BusinessProfile,
            Self::Blog(_) => StepKind::Blog,
            Self::Domain(_) => StepKind::Domain,
            Self::Reach(_) => StepKind::Reach,
            Self::Ecommerce(_) => StepKind::Ecommerce,
            Self::Updates(_) => StepKind::Updates,
            Self::CompanyMail(_) => StepKind::CompanyMail,
            Self::Services(_) => StepKind::Services,
            Self::Contact(_) => StepKind::Contact,
        }
    }

    /// The values this draft would commit, as a standalone store.
    pub fn project(&self) -> FieldStore {
        let mut store = FieldStore::new();
        self.write(&mut store);
        store
    }

    /// Clear every key the step owns, then write the draft's values.
    ///
    /// Callers are expected to validate first; see `Wizard::commit`.
    pub fn commit_into(&self, store: &mut FieldStore) {
        for key in self.kind().owned_keys() {
            store.clear(*key);
        }
        self.write(store);
    }

    fn write(&self, store: &mut FieldStore) {
        match self {
            Self::PageScope(d) => {
                if let Some(scope) = d.answer() {
                    store.set(FieldKey::Scope, scope);
                }
            }
            Self::Seo(d) => d.write(store, FieldKey::Seo),
            Self::BusinessProfile(d) => d.write(store, FieldKey::BusinessProfile),
            Self::Blog(d) => d.write(store, FieldKey::Blog),
            Self::Domain(d) => d.write(store),
            Self::Reach(d) => d.write(store, FieldKey::Reach),
            Self::Ecommerce(d) => d.write(store),
            Self::Updates(d) => d.write(store, FieldKey::Updates),
            Self::CompanyMail(d) => d.write(store),
            Self::Services(d) => store.set(FieldKey::Services, d.selected.clone()),
            Self::Contact(d) => d.write(store),
        }
    }
}

fn set_text(store: &mut FieldStore, key: FieldKey, value: &str) {
    if !value.is_empty() {
        store.set(key, value);
    }
}

// ── Single choice ───────────────────────────────────────────────────

/// A single-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceDraft<T> {
    pub selected: Option<T>,
}

impl<T> Default for ChoiceDraft<T> {
    fn default() -> Self {
        Self { selected: None }
    }
}

impl<T: AnswerOption> ChoiceDraft<T> {
    pub fn select(&mut self, option: T) {
        self.selected = Some(option);
    }

    fn hydrate(store: &FieldStore, key: FieldKey) -> Self {
        Self {
            selected: store.text(key).and_then(T::from_wire),
        }
    }

    fn write(&self, store: &mut FieldStore, key: FieldKey) {
        if let Some(option) = self.selected {
            store.set(key, option.wire());
        }
    }
}

// ── Page scope ──────────────────────────────────────────────────────

/// Preset cards plus an exact subpage slider.
///
/// Picking a preset resets the slider. Moving the slider leaves the preset
/// recorded, but a non-zero slider takes precedence in the answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeDraft {
    preset: Option<ScopePreset>,
    slider: u8,
}

impl ScopeDraft {
    pub fn select_preset(&mut self, preset: ScopePreset) {
        self.preset = Some(preset);
        self.slider = 0;
    }

    /// Set the exact subpage count, clamped to `0..=SLIDER_MAX`.
    pub fn set_slider(&mut self, pages: u8) {
        self.slider = pages.min(SLIDER_MAX);
    }

    pub fn slider(&self) -> u8 {
        self.slider
    }

    /// Preset highlighted on screen: only while the slider is untouched.
    pub fn selected_preset(&self) -> Option<ScopePreset> {
        if self.slider == 0 { self.preset } else { None }
    }

    /// Scope answer as stored: `"N undersidor"` or the preset's wire value.
    pub fn answer(&self) -> Option<String> {
        if self.slider > 0 {
            return Some(format!("{} undersidor", self.slider));
        }
        self.preset.map(|p| p.wire().to_string())
    }

    fn hydrate(store: &FieldStore) -> Self {
        let Some(scope) = store.text(FieldKey::Scope) else {
            return Self::default();
        };
        if let Some(preset) = ScopePreset::from_wire(scope) {
            return Self {
                preset: Some(preset),
                slider: 0,
            };
        }
        let slider = scope
            .strip_suffix(" undersidor")
            .and_then(|n| n.parse::<u8>().ok())
            .map(|n| n.min(SLIDER_MAX))
            .unwrap_or(0);
        Self {
            preset: None,
            slider,
        }
    }
}

// ── Domain ──────────────────────────────────────────────────────────

/// Branch-specific domain answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainAnswer {
    /// The visitor owns a domain.
    Existing { name: String },
    /// The visitor wants one, optionally undecided on the name.
    Wanted { name: String, undecided: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainDraft {
    pub answer: Option<DomainAnswer>,
}

impl DomainDraft {
    /// Pick a branch. Switching branch starts with an empty name; picking
    /// the current branch again only resets the undecided flag.
    pub fn choose(&mut self, choice: YesNo) {
        self.answer = match (self.answer.take(), choice) {
            (Some(DomainAnswer::Existing { name }), YesNo::Yes) => {
                Some(DomainAnswer::Existing { name })
            }
            (Some(DomainAnswer::Wanted { name, .. }), YesNo::No) => Some(DomainAnswer::Wanted {
                name,
                undecided: false,
            }),
            (_, YesNo::Yes) => Some(DomainAnswer::Existing {
                name: String::new(),
            }),
            (_, YesNo::No) => Some(DomainAnswer::Wanted {
                name: String::new(),
                undecided: false,
            }),
        };
    }

    pub fn choice(&self) -> Option<YesNo> {
        match self.answer {
            Some(DomainAnswer::Existing { .. }) => Some(YesNo::Yes),
            Some(DomainAnswer::Wanted { .. }) => Some(YesNo::No),
            None => None,
        }
    }

    /// Edit the domain name. Ignored before a branch is picked and while the
    /// visitor has ticked "undecided" (the input is disabled).
    pub fn set_name(&mut self, value: &str) {
        match &mut self.answer {
            Some(DomainAnswer::Existing { name })
            | Some(DomainAnswer::Wanted {
                name,
                undecided: false,
            }) => *name = value.to_string(),
            _ => {}
        }
    }

    pub fn name(&self) -> &str {
        match &self.answer {
            Some(DomainAnswer::Existing { name }) | Some(DomainAnswer::Wanted { name, .. }) => {
                name.as_str()
            }
            None => "",
        }
    }

    /// Toggle "undecided" on the wanted branch. Ticking it clears the name.
    pub fn set_undecided(&mut self, value: bool) {
        if let Some(DomainAnswer::Wanted { name, undecided }) = &mut self.answer {
            *undecided = value;
            if value {
                name.clear();
            }
        }
    }

    /// Suggestions shown under the wanted-domain input.
    pub fn suggestions(&self) -> Vec<String> {
        match &self.answer {
            Some(DomainAnswer::Wanted {
                name,
                undecided: false,
            }) if name.chars().count() > 2 => suggest_domains(name),
            _ => Vec::new(),
        }
    }

    fn hydrate(store: &FieldStore) -> Self {
        let name = store.text(FieldKey::DomainName).unwrap_or_default().to_string();
        let answer = match store.text(FieldKey::DomainType).and_then(YesNo::from_wire) {
            Some(YesNo::Yes) => Some(DomainAnswer::Existing { name }),
            Some(YesNo::No) => Some(DomainAnswer::Wanted {
                name,
                undecided: store.flag(FieldKey::DomainUnknown),
            }),
            None => None,
        };
        Self { answer }
    }

    fn write(&self, store: &mut FieldStore) {
        match &self.answer {
            Some(DomainAnswer::Existing { name }) => {
                store.set(FieldKey::DomainType, YesNo::Yes.wire());
                set_text(store, FieldKey::DomainName, name);
            }
            Some(DomainAnswer::Wanted { name, undecided }) => {
                store.set(FieldKey::DomainType, YesNo::No.wire());
                set_text(store, FieldKey::DomainName, name);
                if *undecided {
                    store.set(FieldKey::DomainUnknown, true);
                }
            }
            None => {}
        }
    }
}

// ── Ecommerce ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EcommerceDetail {
    pub priority: Option<EcommercePriority>,
    pub product_count: String,
    pub product_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcommerceAnswer {
    No,
    Yes(EcommerceDetail),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EcommerceDraft {
    pub answer: Option<EcommerceAnswer>,
}

impl EcommerceDraft {
    /// Pick yes/no. Answering no drops every detail field.
    pub fn choose(&mut self, choice: YesNo) {
        self.answer = match (self.answer.take(), choice) {
            (Some(EcommerceAnswer::Yes(detail)), YesNo::Yes) => Some(EcommerceAnswer::Yes(detail)),
            (_, YesNo::Yes) => Some(EcommerceAnswer::Yes(EcommerceDetail::default())),
            (_, YesNo::No) => Some(EcommerceAnswer::No),
        };
    }

    pub fn choice(&self) -> Option<YesNo> {
        match self.answer {
            Some(EcommerceAnswer::Yes(_)) => Some(YesNo::Yes),
            Some(EcommerceAnswer::No) => Some(YesNo::No),
            None => None,
        }
    }

    /// Detail fields, present only on the yes branch.
    pub fn detail_mut(&mut self) -> Option<&mut EcommerceDetail> {
        match &mut self.answer {
            Some(EcommerceAnswer::Yes(detail)) => Some(detail),
            _ => None,
        }
    }

    pub fn set_priority(&mut self, priority: EcommercePriority) {
        if let Some(detail) = self.detail_mut() {
            detail.priority = Some(priority);
        }
    }

    pub fn set_product_count(&mut self, value: &str) {
        if let Some(detail) = self.detail_mut() {
            detail.product_count = value.to_string();
        }
    }

    pub fn set_product_type(&mut self, value: &str) {
        if let Some(detail) = self.detail_mut() {
            detail.product_type = value.to_string();
        }
    }

    fn hydrate(store: &FieldStore) -> Self {
        let answer = match store.text(FieldKey::Ecommerce).and_then(YesNo::from_wire) {
            Some(YesNo::Yes) => Some(EcommerceAnswer::Yes(EcommerceDetail {
                priority: store
                    .text(FieldKey::EcommercePriority)
                    .and_then(EcommercePriority::from_wire),
                product_count: store.display(FieldKey::ProductCount).unwrap_or_default(),
                product_type: store.display(FieldKey::ProductType).unwrap_or_default(),
            })),
            Some(YesNo::No) => Some(EcommerceAnswer::No),
            None => None,
        };
        Self { answer }
    }

    fn write(&self, store: &mut FieldStore) {
        match &self.answer {
            Some(EcommerceAnswer::Yes(detail)) => {
                store.set(FieldKey::Ecommerce, YesNo::Yes.wire());
                if let Some(priority) = detail.priority {
                    store.set(FieldKey::EcommercePriority, priority.wire());
                }
                set_text(store, FieldKey::ProductCount, &detail.product_count);
                set_text(store, FieldKey::ProductType, &detail.product_type);
            }
            Some(EcommerceAnswer::No) => store.set(FieldKey::Ecommerce, YesNo::No.wire()),
            None => {}
        }
    }
}

// ── Company mail ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailAnswer {
    No,
    /// One entry per requested mailbox; the count is `names.len()`.
    Yes { names: Vec<String> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailDraft {
    pub answer: Option<MailAnswer>,
}

impl MailDraft {
    /// Pick yes/no. Switching to yes starts with one empty mailbox.
    pub fn choose(&mut self, choice: YesNo) {
        self.answer = match (self.answer.take(), choice) {
            (Some(MailAnswer::Yes { names }), YesNo::Yes) => Some(MailAnswer::Yes { names }),
            (_, YesNo::Yes) => Some(MailAnswer::Yes {
                names: vec![String::new(); MAIL_COUNT_MIN],
            }),
            (_, YesNo::No) => Some(MailAnswer::No),
        };
    }

    pub fn choice(&self) -> Option<YesNo> {
        match self.answer {
            Some(MailAnswer::Yes { .. }) => Some(YesNo::Yes),
            Some(MailAnswer::No) => Some(YesNo::No),
            None => None,
        }
    }

    /// Number of mailboxes requested; zero unless on the yes branch.
    pub fn count(&self) -> usize {
        self.names().len()
    }

    pub fn names(&self) -> &[String] {
        match &self.answer {
            Some(MailAnswer::Yes { names }) => names,
            _ => &[],
        }
    }

    /// Resize the mailbox list. Growing appends empty entries; shrinking
    /// drops entries from the end and leaves earlier ones untouched.
    pub fn set_count(&mut self, count: usize) {
        if let Some(MailAnswer::Yes { names }) = &mut self.answer {
            names.resize(count.clamp(MAIL_COUNT_MIN, MAIL_COUNT_MAX), String::new());
        }
    }

    /// Edit one mailbox name. Out-of-range indices are ignored.
    pub fn set_name(&mut self, index: usize, value: &str) {
        if let Some(MailAnswer::Yes { names }) = &mut self.answer
            && let Some(slot) = names.get_mut(index)
        {
            *slot = value.to_string();
        }
    }

    fn hydrate(store: &FieldStore) -> Self {
        let answer = match store.text(FieldKey::Mail).and_then(YesNo::from_wire) {
            Some(YesNo::Yes) => {
                let mut names: Vec<String> = store
                    .list(FieldKey::EmailNames)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default();
                let count = store
                    .number(FieldKey::MailCount)
                    .map(|n| n as usize)
                    .unwrap_or(names.len());
                names.resize(count.clamp(MAIL_COUNT_MIN, MAIL_COUNT_MAX), String::new());
                Some(MailAnswer::Yes { names })
            }
            Some(YesNo::No) => Some(MailAnswer::No),
            None => None,
        };
        Self { answer }
    }

    fn write(&self, store: &mut FieldStore) {
        match &self.answer {
            Some(MailAnswer::Yes { names }) => {
                store.set(FieldKey::Mail, YesNo::Yes.wire());
                store.set(FieldKey::MailCount, names.len() as u32);
                store.set(FieldKey::EmailNames, names.clone());
            }
            Some(MailAnswer::No) => store.set(FieldKey::Mail, YesNo::No.wire()),
            None => {}
        }
    }
}

// ── Services ────────────────────────────────────────────────────────

/// Multi-select of extra services, in order of first selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServicesDraft {
    selected: Vec<String>,
}

impl ServicesDraft {
    pub fn toggle(&mut self, service: ExtraService) {
        let key = service.wire();
        if let Some(pos) = self.selected.iter().position(|s| s == key) {
            self.selected.remove(pos);
        } else {
            self.selected.push(key.to_string());
        }
    }

    pub fn is_selected(&self, service: ExtraService) -> bool {
        self.selected.iter().any(|s| s == service.wire())
    }

    /// Raw service keys, including any the front-end sent that this build
    /// does not know.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    fn hydrate(store: &FieldStore) -> Self {
        Self {
            selected: store
                .list(FieldKey::Services)
                .map(<[String]>::to_vec)
                .unwrap_or_default(),
        }
    }
}

// ── Contact ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Company,
    Name,
    Email,
    Phone,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [Self::Company, Self::Name, Self::Email, Self::Phone];

    pub fn key(self) -> FieldKey {
        match self {
            Self::Company => FieldKey::Company,
            Self::Name => FieldKey::Name,
            Self::Email => FieldKey::Email,
            Self::Phone => FieldKey::Phone,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub company: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ContactDraft {
    pub fn set(&mut self, field: ContactField, value: &str) {
        *self.slot(field) = value.to_string();
    }

    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Company => &self.company,
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
        }
    }

    fn slot(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Company => &mut self.company,
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
        }
    }

    fn hydrate(store: &FieldStore) -> Self {
        let mut draft = Self::default();
        for field in ContactField::ALL {
            if let Some(value) = store.text(field.key()) {
                draft.set(field, value);
            }
        }
        draft
    }

    fn write(&self, store: &mut FieldStore) {
        for field in ContactField::ALL {
            set_text(store, field.key(), self.get(field));
        }
    }
}
