//! Typed CRM search filters: a query matches when any of its groups matches,
//! and a group matches when all of its filters match.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperator {
    Eq,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub property_name: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl Filter {
    pub fn eq(property_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            operator: FilterOperator::Eq,
            value: value.into(),
        }
    }

    pub fn matches(&self, property_value: Option<&str>) -> bool {
        match self.operator {
            FilterOperator::Eq => property_value == Some(self.value.as_str()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub filters: Vec<Filter>,
}

impl FilterGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub filter_groups: Vec<FilterGroup>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn or(mut self, group: FilterGroup) -> Self {
        self.filter_groups.push(group);
        self
    }

    /// One single-filter group per property, all comparing against `value`.
    pub fn any_eq<I, S>(properties: I, value: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        properties.into_iter().fold(Self::new(), |query, property| {
            query.or(FilterGroup::new().and(Filter::eq(property, value)))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.filter_groups.iter().all(|group| group.filters.is_empty())
    }

    /// Evaluates the query against a record, looking properties up through
    /// `lookup`. Groups without filters never match.
    pub fn matches<'a, F>(&self, lookup: F) -> bool
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        self.filter_groups.iter().any(|group| {
            !group.filters.is_empty()
                && group
                    .filters
                    .iter()
                    .all(|filter| filter.matches(lookup(&filter.property_name)))
        })
    }
}
