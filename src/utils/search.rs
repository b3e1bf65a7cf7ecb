use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};

/// Needs no quoting in any backend's string literal
const ESCAPE: char = '!';

/// Escapes LIKE wildcards so the term matches literally
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | ESCAPE) {
            escaped.push(ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(&term.to_lowercase()))
}

/// Case-insensitive substring match of `term`, OR-combined across `columns`.
///
/// SQLite's `LOWER` folds ASCII only, so there non-ASCII letters (Cyrillic
/// names, for one) match case-sensitively. Postgres folds them as well. The
/// term as typed is matched too, so an exact-case search always hits.
pub fn contains_any<C: ColumnTrait>(columns: &[C], term: &str) -> Condition {
    let folded = contains_pattern(term);
    let verbatim = format!("%{}%", escape_like(term));
    columns.iter().fold(Condition::any(), |cond, column| {
        let cond = cond.add(
            Expr::expr(Func::lower(Expr::col(*column)))
                .like(LikeExpr::new(folded.clone()).escape(ESCAPE)),
        );
        if verbatim == folded {
            cond
        } else {
            cond.add(Expr::col(*column).like(LikeExpr::new(verbatim.clone()).escape(ESCAPE)))
        }
    })
}

/// Always-false predicate for filter values that cannot name any row
pub fn match_nothing() -> SimpleExpr {
    Expr::val(1).eq(0)
}
