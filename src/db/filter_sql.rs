//! Renders a [`Filter`] as a SQL predicate over the `recipes` table.
//!
//! Embedded lists are stored as JSON arrays, so list clauses become
//! `EXISTS` sub-selects over `json_each`. Every value is bound.
//!
//! SQLite's `lower()` only folds ASCII, so substring clauses compare against
//! the `*_folded` columns written by the repository with [`fold_case`].

use recipebox_core::{fold_case, Filter};
use sqlx::{QueryBuilder, Sqlite};

pub(crate) fn push_predicate(qb: &mut QueryBuilder<'_, Sqlite>, filter: &Filter) {
    match filter {
        Filter::All => {
            qb.push("1 = 1");
        }
        Filter::And(clauses) if clauses.is_empty() => {
            qb.push("1 = 1");
        }
        Filter::And(clauses) => {
            qb.push("(");
            for (i, clause) in clauses.iter().enumerate() {
                if i > 0 {
                    qb.push(" AND ");
                }
                push_predicate(qb, clause);
            }
            qb.push(")");
        }
        Filter::NameContains(needle) => {
            qb.push("instr(recipes.name_folded, ");
            qb.push_bind(fold_case(needle));
            qb.push(") > 0");
        }
        Filter::CuisineIn(names) if names.is_empty() => {
            qb.push("1 = 0");
        }
        Filter::CuisineIn(names) => {
            qb.push("json_extract(recipes.cuisine, '$.name') IN ");
            push_list(qb, names);
        }
        Filter::AnyTagIn(names) if names.is_empty() => {
            qb.push("1 = 0");
        }
        Filter::AnyTagIn(names) => {
            qb.push(
                "EXISTS (SELECT 1 FROM json_each(recipes.tags) AS t \
                 WHERE json_extract(t.value, '$.name') IN ",
            );
            push_list(qb, names);
            qb.push(")");
        }
        Filter::IngredientContains(token) => {
            qb.push(
                "EXISTS (SELECT 1 FROM json_each(recipes.ingredients_folded) AS i \
                 WHERE instr(i.value, ",
            );
            qb.push_bind(fold_case(token));
            qb.push(") > 0)");
        }
        Filter::IngredientNamed(name) => {
            qb.push(
                "EXISTS (SELECT 1 FROM json_each(recipes.ingredients) AS i \
                 WHERE json_extract(i.value, '$.name') = ",
            );
            qb.push_bind(name.clone());
            qb.push(")");
        }
    }
}

fn push_list(qb: &mut QueryBuilder<'_, Sqlite>, values: &[String]) {
    qb.push("(");
    let mut list = qb.separated(", ");
    for value in values {
        list.push_bind(value.clone());
    }
    list.push_unseparated(")");
}
