use super::super::classifier::ClassifiedBase;
use super::super::domain::SalespersonId;
use std::collections::BTreeSet;

/// Label of the "every salesperson" option.
pub const ALL_SALESPEOPLE: &str = "Todos";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SalespersonFilter {
    #[default]
    All,
    Only(SalespersonId),
}

impl SalespersonFilter {
    /// Interprets a selector value; blank or "Todos" selects everyone.
    pub fn from_selection(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == ALL_SALESPEOPLE {
            Self::All
        } else {
            Self::Only(SalespersonId::new(trimmed))
        }
    }

    pub fn matches(&self, salesperson: &SalespersonId) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == salesperson,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_SALESPEOPLE,
            Self::Only(selected) => selected.as_str(),
        }
    }
}

/// Selector values: "Todos" followed by the sorted distinct salespeople.
pub fn salesperson_options(base: &ClassifiedBase) -> Vec<String> {
    let names: BTreeSet<&str> = base
        .clients()
        .iter()
        .map(|client| client.salesperson.as_str())
        .filter(|name| !name.trim().is_empty())
        .collect();

    std::iter::once(ALL_SALESPEOPLE.to_string())
        .chain(names.into_iter().map(str::to_string))
        .collect()
}
