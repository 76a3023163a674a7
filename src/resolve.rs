//! Unwrapping of `LIST`/`NON_NULL` chains down to the named base type.
use crate::error::ResolveError;
use crate::schema::{Kind, TypeRef};

/// The named base type at the end of a wrapper chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unwrapped<'a> {
    pub kind: Kind,
    pub name: &'a str,
    /// Number of `LIST`/`NON_NULL` wrappers passed to reach the base.
    pub depth: usize,
}

impl TypeRef {
    /// Follow `of_type` past every wrapper and return the base type.
    ///
    /// Fails when the chain ends while still wrapped, or when the base node
    /// has no name.
    pub fn resolve(&self) -> Result<Unwrapped<'_>, ResolveError> {
        let mut node = self;
        let mut depth = 0;
        while node.kind.is_wrapper() {
            node = match node.of_type.as_deref() {
                Some(inner) => inner,
                None => return Err(ResolveError::Malformed { kind: node.kind, depth }),
            };
            depth += 1;
        }
        match node.name.as_deref() {
            Some(name) if !name.is_empty() => Ok(Unwrapped { kind: node.kind, name, depth }),
            _ => Err(ResolveError::Unnamed { kind: node.kind, depth }),
        }
    }

    /// Wrapper kinds from the outside in. Stops at the base type, or at the
    /// point where a malformed chain runs out.
    pub fn wrappers(&self) -> impl Iterator<Item = Kind> + '_ {
        std::iter::successors(Some(self), |node| node.of_type.as_deref())
            .map(|node| node.kind)
            .take_while(|kind| kind.is_wrapper())
    }

    /// Nullability belongs to the reference: only the outermost node counts.
    pub fn is_non_null(&self) -> bool {
        self.kind == Kind::NonNull
    }

    pub fn is_list(&self) -> bool {
        self.wrappers().any(|kind| kind == Kind::List)
    }

    pub fn is_input_object(&self) -> bool {
        matches!(self.resolve(), Ok(base) if base.kind == Kind::InputObject)
    }

    pub fn is_scalar_id(&self) -> bool {
        matches!(self.resolve(), Ok(base) if base.kind == Kind::Scalar && base.name == "ID")
    }

    /// Base type name, or `""` when the chain is malformed.
    pub fn type_name(&self) -> &str {
        self.resolve().map(|base| base.name).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broken(kind: Kind) -> TypeRef {
        TypeRef { kind, name: None, of_type: None }
    }

    #[test]
    fn resolves_through_every_wrapper() {
        let cases = [
            (TypeRef::named(Kind::Scalar, "String"), Kind::Scalar, "String", 0),
            (TypeRef::non_null(TypeRef::named(Kind::Object, "Account")), Kind::Object, "Account", 1),
            (
                TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named(Kind::Enum, "Status")))),
                Kind::Enum,
                "Status",
                3,
            ),
            (
                TypeRef::list(TypeRef::list(TypeRef::named(Kind::InputObject, "Filter"))),
                Kind::InputObject,
                "Filter",
                2,
            ),
        ];
        for (type_ref, kind, name, depth) in cases {
            assert_eq!(type_ref.resolve(), Ok(Unwrapped { kind, name, depth }));
        }
    }

    #[test]
    fn chain_that_runs_out_is_malformed() {
        assert_eq!(
            broken(Kind::NonNull).resolve(),
            Err(ResolveError::Malformed { kind: Kind::NonNull, depth: 0 })
        );
        assert_eq!(
            TypeRef::non_null(TypeRef::list(broken(Kind::NonNull))).resolve(),
            Err(ResolveError::Malformed { kind: Kind::NonNull, depth: 2 })
        );
    }

    #[test]
    fn unnamed_base_is_malformed() {
        assert_eq!(
            TypeRef::list(broken(Kind::Object)).resolve(),
            Err(ResolveError::Unnamed { kind: Kind::Object, depth: 1 })
        );
        assert_eq!(
            TypeRef::named(Kind::Scalar, "").resolve(),
            Err(ResolveError::Unnamed { kind: Kind::Scalar, depth: 0 })
        );
    }

    #[test]
    fn non_null_is_outermost_only() {
        let inner_only = TypeRef::list(TypeRef::non_null(TypeRef::named(Kind::Scalar, "Int")));
        assert!(!inner_only.is_non_null());
        assert!(inner_only.is_list());
        assert!(TypeRef::non_null(inner_only).is_non_null());
    }

    #[test]
    fn wrappers_are_listed_outside_in() {
        let r = TypeRef::non_null(TypeRef::list(TypeRef::named(Kind::Scalar, "ID")));
        assert_eq!(r.wrappers().collect::<Vec<_>>(), vec![Kind::NonNull, Kind::List]);
        assert!(r.is_scalar_id());
        assert!(!TypeRef::named(Kind::Object, "ID").is_scalar_id());
    }

    #[test]
    fn predicates_on_malformed_chains_are_false() {
        let r = TypeRef::non_null(broken(Kind::List));
        assert!(r.is_non_null());
        assert!(!r.is_input_object());
        assert!(!r.is_scalar_id());
        assert_eq!(r.type_name(), "");
    }

    #[test]
    fn input_object_is_judged_on_the_base() {
        let r = TypeRef::list(TypeRef::named(Kind::InputObject, "Filter"));
        assert!(r.is_input_object());
        assert_eq!(r.type_name(), "Filter");
    }
}
