//! Filter expressions over the recipe collection.
//!
//! A [`Filter`] is store-agnostic: [`Filter::matches`] defines what it means,
//! and every store backend must return exactly the recipes it accepts.

use crate::models::Recipe;

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Every recipe.
    All,
    /// Every sub-filter holds. An empty list behaves like [`Filter::All`].
    And(Vec<Filter>),
    /// Recipe name contains the needle, ignoring case.
    NameContains(String),
    /// Embedded cuisine name is one of the set. An empty set matches nothing.
    CuisineIn(Vec<String>),
    /// At least one embedded tag name is in the set. An empty set matches nothing.
    AnyTagIn(Vec<String>),
    /// Some ingredient name contains the token, ignoring case.
    IngredientContains(String),
    /// Some ingredient name equals the value exactly.
    IngredientNamed(String),
}

impl Filter {
    /// Conjoins clauses, collapsing the trivial cases.
    pub fn all_of(mut clauses: Vec<Filter>) -> Self {
        match clauses.len() {
            0 => Filter::All,
            1 => clauses.remove(0),
            _ => Filter::And(clauses),
        }
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            Filter::All => true,
            Filter::And(clauses) => clauses.iter().all(|c| c.matches(recipe)),
            Filter::NameContains(needle) => contains_ignore_case(&recipe.name, needle),
            Filter::CuisineIn(names) => names.iter().any(|n| *n == recipe.cuisine.name),
            Filter::AnyTagIn(names) => names.iter().any(|n| recipe.has_tag(n)),
            Filter::IngredientContains(token) => recipe
                .ingredients
                .iter()
                .any(|i| contains_ignore_case(&i.name, token)),
            Filter::IngredientNamed(name) => recipe.ingredients.iter().any(|i| i.name == *name),
        }
    }
}

/// Case folding used for every case-insensitive comparison. Stores that
/// cannot fold Unicode themselves persist this form next to the original.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    fold_case(haystack).contains(&fold_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityRef, Ingredient};
    use uuid::Uuid;

    fn named(name: &str) -> EntityRef {
        EntityRef {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    fn curry() -> Recipe {
        Recipe::new("Green Curry", named("Thai"))
            .with_ingredients(vec![
                Ingredient::new("Coconut Milk", 400.0, "ml"),
                Ingredient::new("chicken thigh", 500.0, "g"),
            ])
            .with_tags(vec![named("spicy"), named("dinner")])
    }

    #[test]
    fn test_all_of_collapses() {
        assert_eq!(Filter::all_of(vec![]), Filter::All);
        assert_eq!(
            Filter::all_of(vec![Filter::NameContains("a".into())]),
            Filter::NameContains("a".into())
        );
    }

    #[test]
    fn test_name_contains_ignores_case() {
        assert!(Filter::NameContains("CURRY".into()).matches(&curry()));
        assert!(Filter::NameContains("een cu".into()).matches(&curry()));
        assert!(!Filter::NameContains("soup".into()).matches(&curry()));
    }

    #[test]
    fn test_case_folding_covers_non_ascii() {
        let recipe = Recipe::new("CRÈME BRÛLÉE", named("French"))
            .with_ingredients(vec![Ingredient::new("CRÈME FRAÎCHE", 100.0, "ml")]);
        assert!(Filter::NameContains("brûlée".into()).matches(&recipe));
        assert!(Filter::IngredientContains("fraîche".into()).matches(&recipe));
        assert_eq!(fold_case("ÉCLAIR"), "éclair");
    }

    #[test]
    fn test_any_tag_in_is_disjunctive() {
        let recipe = curry();
        assert!(Filter::AnyTagIn(vec!["popular".into(), "spicy".into()]).matches(&recipe));
        assert!(!Filter::AnyTagIn(vec!["popular".into()]).matches(&recipe));
        assert!(!Filter::AnyTagIn(vec![]).matches(&recipe));
    }

    #[test]
    fn test_tag_names_are_exact() {
        assert!(!Filter::AnyTagIn(vec!["Spicy".into()]).matches(&curry()));
    }

    #[test]
    fn test_ingredient_contains_ignores_case() {
        assert!(Filter::IngredientContains("coconut".into()).matches(&curry()));
        assert!(Filter::IngredientContains("THIGH".into()).matches(&curry()));
        assert!(!Filter::IngredientContains("beef".into()).matches(&curry()));
    }

    #[test]
    fn test_and_requires_every_clause() {
        let both = Filter::And(vec![
            Filter::IngredientContains("coconut".into()),
            Filter::IngredientContains("chicken".into()),
        ]);
        assert!(both.matches(&curry()));

        let one_missing = Filter::And(vec![
            Filter::IngredientContains("coconut".into()),
            Filter::IngredientContains("beef".into()),
        ]);
        assert!(!one_missing.matches(&curry()));

        assert!(Filter::And(vec![]).matches(&curry()));
    }

    #[test]
    fn test_exact_membership_variants() {
        let recipe = curry();
        assert!(Filter::CuisineIn(vec!["Thai".into()]).matches(&recipe));
        assert!(!Filter::CuisineIn(vec!["thai".into()]).matches(&recipe));
        assert!(Filter::IngredientNamed("Coconut Milk".into()).matches(&recipe));
        assert!(!Filter::IngredientNamed("coconut".into()).matches(&recipe));
    }
}
