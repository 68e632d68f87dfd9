use super::node::Node;

/// `a` is satisfied by `b`.
///
/// Names must match (literal equality, or `a`'s glob accepting `b`'s pattern
/// text) and directory flags must agree. Every required child of `a` then
/// needs at least one child of `b` that recursively satisfies it. Optional
/// children of `a` impose nothing.
///
/// The relation is reflexive and asymmetric: a template that requires more
/// satisfies one that requires less, not the other way round.
#[must_use]
pub fn contains(a: &Node, b: &Node) -> bool {
    if a.is_directory != b.is_directory || !a.pattern.covers(&b.pattern) {
        return false;
    }

    a.required_children()
        .all(|required| b.children.iter().any(|candidate| contains(required, candidate)))
}

#[cfg(test)]
#[path = "relation_tests.rs"]
mod tests;
