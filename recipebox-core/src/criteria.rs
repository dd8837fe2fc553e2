//! Turns search inputs into [`Filter`] expressions.
//!
//! Two sources feed the builder: the query string of a plain search, and the
//! structured criteria a text generator extracts from a free-text query. List
//! inputs that end up with no usable values add no clause, the same as when
//! the input is absent.

use serde::{Deserialize, Serialize};

use crate::filter::Filter;

/// Query-string parameters of a recipe search.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SearchParams {
    pub name: Option<String>,
    /// Comma-separated tag names, any of which may match.
    pub tags: Option<String>,
    /// Comma-separated ingredient tokens, all of which must match.
    pub ingredients: Option<String>,
}

impl SearchParams {
    pub fn criteria(&self) -> Filter {
        let mut clauses = Vec::new();

        if let Some(name) = self.name.as_deref().map(str::trim) {
            if !name.is_empty() {
                clauses.push(Filter::NameContains(name.to_string()));
            }
        }

        if let Some(tags) = self.tags.as_deref() {
            let tags = split_list(tags);
            if !tags.is_empty() {
                clauses.push(Filter::AnyTagIn(tags));
            }
        }

        if let Some(ingredients) = self.ingredients.as_deref() {
            clauses.extend(
                split_list(ingredients)
                    .into_iter()
                    .map(Filter::IngredientContains),
            );
        }

        Filter::all_of(clauses)
    }
}

/// Structured search criteria extracted from a free-text query.
///
/// Values are expected to come from the vocabularies handed to the
/// generator, so they are matched exactly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractedCriteria {
    pub cuisines: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
}

impl ExtractedCriteria {
    pub fn criteria(&self) -> Filter {
        let mut clauses = Vec::new();

        if let Some(cuisines) = non_empty(&self.cuisines) {
            clauses.push(Filter::CuisineIn(cuisines));
        }
        if let Some(tags) = non_empty(&self.tags) {
            clauses.push(Filter::AnyTagIn(tags));
        }
        if let Some(ingredients) = non_empty(&self.ingredients) {
            clauses.extend(ingredients.into_iter().map(Filter::IngredientNamed));
        }

        Filter::all_of(clauses)
    }

    pub fn is_empty(&self) -> bool {
        non_empty(&self.cuisines).is_none()
            && non_empty(&self.tags).is_none()
            && non_empty(&self.ingredients).is_none()
    }
}

/// Splits a comma-delimited list, trimming entries and dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn non_empty(values: &Option<Vec<String>>) -> Option<Vec<String>> {
    let values: Vec<String> = values
        .as_deref()?
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect();
    (!values.is_empty()).then_some(values)
}
