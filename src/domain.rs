//! Registry of abstract domains known to the analyzer.
//!
//! Configuration refers to domains by name. Migrated configuration resolves those names through
//! an explicit registry lookup instead of inlining the domain.

use std::collections::BTreeMap;

/// Name and short description of an abstract domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainInfo {
    pub name: String,
    pub description: String,
}

/// Name-indexed table of abstract domains.
#[derive(Debug, Clone, Default)]
pub struct DomainRegistry {
    domains: BTreeMap<String, DomainInfo>,
}

impl DomainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry populated with the domains the analyzer ships with.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, description) in [
            ("Interval", "interval domain for single values"),
            ("Interval/Pow2", "intervals with power-of-two bounds"),
            ("Octagon", "octagonal constraint domain (±x ± y ≤ c)"),
            ("Zones", "difference-bound zone domain (DBM)"),
            ("Equality", "equalities between pairs of values"),
            ("Affine", "relational domain of affine equalities between pairs of variables"),
            ("Congruence", "value congruence domain (x ≡ r mod m)"),
            ("SimpleConstProp", "classic constant propagation lattice"),
            ("BitMask/Single", "track possible values of bits of each variable"),
            ("BitMask/Relational", "track bit values of a difference between variables"),
            ("NumRels", "unsigned and signed numeric relational domain"),
            ("NumRels.Signed", "signed numeric relational domain"),
            ("NumRels.Unsigned", "unsigned numeric relational domain"),
            ("NumRels.Zero", "signed numeric relational domain for all available non-pointers with 0"),
            ("MemRange", "memory accesses in terms of function arguments"),
            ("MemRange/Everywhere", "memory ranges tracked at every location"),
            ("NoAlias", "pairs of pointers that never alias"),
        ] {
            registry.register(name, description);
        }
        registry
    }

    /// Adds a domain, replacing any previous entry with the same name.
    pub fn register(&mut self, name: impl Into<String>, description: impl Into<String>) {
        let name = name.into();
        let info = DomainInfo {
            name: name.clone(),
            description: description.into(),
        };
        self.domains.insert(name, info);
    }

    pub fn lookup(&self, name: &str) -> Option<&DomainInfo> {
        self.domains.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(|s| s.as_str())
    }
}

/// Expression that resolves `name` through the registry at configuration load time.
pub fn lookup_expr(name: &str) -> String {
    // Debug formatting quotes and escapes the name.
    format!("domains[{:?}]", name)
}
