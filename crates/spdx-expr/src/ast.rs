//! Expression tree produced by the parser.
//!
//! The tree mirrors the surface syntax: identifiers are leaves, `AND`, `OR`
//! and `WITH` are binary nodes, and parentheses survive as [`Expression::Group`]
//! so `MIT` and `(MIT)` remain distinguishable. Nodes own their children and
//! are never mutated once built; combining expressions always creates a new
//! node.
//!
//! Read-only helpers such as [`Expression::identifiers`] walk the tree with an
//! explicit stack, and dropping a tree unlinks it node by node, so neither
//! grows the call stack with the height of the tree. The derived `Clone`,
//! `PartialEq`, `Hash` and `Debug` implementations recurse once per level.

use std::mem;

/// A parsed SPDX license expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Expression {
    /// A license or exception identifier, with its original spelling.
    Identifier(String),
    /// `left AND right`.
    Conjunction(Box<Expression>, Box<Expression>),
    /// `left OR right`.
    Disjunction(Box<Expression>, Box<Expression>),
    /// `license WITH exception`.
    Exception(Box<Expression>, Box<Expression>),
    /// A parenthesised sub-expression.
    Group(Box<Expression>),
}

impl Expression {
    /// Create an identifier leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use spdx_expr::Expression;
    ///
    /// let expr = Expression::identifier("MIT");
    /// assert_eq!(expr.as_identifier(), Some("MIT"));
    /// ```
    #[must_use]
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Combine two expressions with `AND`.
    #[must_use]
    pub fn conjunction(left: Self, right: Self) -> Self {
        Self::Conjunction(Box::new(left), Box::new(right))
    }

    /// Combine two expressions with `OR`.
    #[must_use]
    pub fn disjunction(left: Self, right: Self) -> Self {
        Self::Disjunction(Box::new(left), Box::new(right))
    }

    /// Attach an exception to a license with `WITH`.
    #[must_use]
    pub fn exception(license: Self, exception: Self) -> Self {
        Self::Exception(Box::new(license), Box::new(exception))
    }

    /// Wrap an expression in parentheses.
    #[must_use]
    pub fn group(inner: Self) -> Self {
        Self::Group(Box::new(inner))
    }

    /// Return the identifier text when this node is a leaf.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Short lower-case name of the node variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Identifier(_) => "identifier",
            Self::Conjunction(..) => "conjunction",
            Self::Disjunction(..) => "disjunction",
            Self::Exception(..) => "exception",
            Self::Group(_) => "group",
        }
    }

    /// Direct children, left to right.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        match self {
            Self::Identifier(_) => Vec::new(),
            Self::Conjunction(lhs, rhs)
            | Self::Disjunction(lhs, rhs)
            | Self::Exception(lhs, rhs) => vec![lhs.as_ref(), rhs.as_ref()],
            Self::Group(inner) => vec![inner.as_ref()],
        }
    }

    /// Collect every identifier in the tree in left-to-right order.
    ///
    /// Exception identifiers are included; duplicates are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// let expr = spdx_expr::parse("(MIT OR Apache-2.0) AND GPL-2.0 WITH Classpath-exception-2.0")
    ///     .unwrap_or_else(|| panic!("expression should parse"));
    /// assert_eq!(
    ///     expr.identifiers(),
    ///     vec!["MIT", "Apache-2.0", "GPL-2.0", "Classpath-exception-2.0"]
    /// );
    /// ```
    #[must_use]
    pub fn identifiers(&self) -> Vec<&str> {
        let mut found = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            if let Self::Identifier(name) = node {
                found.push(name.as_str());
            }
            pending.extend(node.children().into_iter().rev());
        }
        found
    }

    /// Height of the tree; a lone identifier has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            pending.extend(node.children().into_iter().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Move the children onto `into`, leaving empty leaves in their place.
    fn detach_children(&mut self, into: &mut Vec<Self>) {
        match self {
            Self::Identifier(_) => {}
            Self::Conjunction(lhs, rhs)
            | Self::Disjunction(lhs, rhs)
            | Self::Exception(lhs, rhs) => {
                into.push(Self::take(lhs));
                into.push(Self::take(rhs));
            }
            Self::Group(inner) => into.push(Self::take(inner)),
        }
    }

    fn take(slot: &mut Self) -> Self {
        mem::replace(slot, Self::Identifier(String::new()))
    }
}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> Expression {
        Expression::identifier(name)
    }

    #[test]
    fn group_is_distinct_from_its_contents() {
        assert_ne!(Expression::group(id("MIT")), id("MIT"));
    }

    #[test]
    fn constructors_box_children() {
        let expr = Expression::exception(id("GPL-2.0"), id("Classpath-exception-2.0"));
        let Expression::Exception(license, exception) = &expr else {
            panic!("expected exception node, got {expr:?}");
        };
        assert_eq!(license.as_identifier(), Some("GPL-2.0"));
        assert_eq!(exception.as_identifier(), Some("Classpath-exception-2.0"));
    }

    #[test]
    fn reports_variant_kind() {
        assert_eq!(id("MIT").kind(), "identifier");
        assert_eq!(Expression::conjunction(id("A"), id("B")).kind(), "conjunction");
        assert_eq!(Expression::disjunction(id("A"), id("B")).kind(), "disjunction");
        assert_eq!(Expression::exception(id("A"), id("B")).kind(), "exception");
        assert_eq!(Expression::group(id("A")).kind(), "group");
    }

    #[test]
    fn lists_identifiers_in_source_order() {
        let expr = Expression::conjunction(
            Expression::group(Expression::disjunction(id("A"), id("B"))),
            Expression::exception(id("C"), id("D")),
        );
        assert_eq!(expr.identifiers(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn measures_depth() {
        assert_eq!(id("A").depth(), 1);
        let expr = Expression::conjunction(id("A"), Expression::group(id("B")));
        assert_eq!(expr.depth(), 3);
    }

    #[test]
    fn identifiers_handle_deep_trees() {
        let mut expr = id("leaf");
        for _ in 0..10_000 {
            expr = Expression::group(expr);
        }
        assert_eq!(expr.identifiers(), vec!["leaf"]);
        assert_eq!(expr.depth(), 10_001);
    }

    #[test]
    fn drops_very_deep_trees() {
        let mut expr = id("right");
        for _ in 0..100_000 {
            expr = Expression::group(Expression::disjunction(id("left"), expr));
        }
        assert_eq!(expr.depth(), 200_001);
        drop(expr);
    }
}
