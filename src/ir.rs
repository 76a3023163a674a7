// Emission model for codegen. Names, type expressions and tags are final here;
// nothing downstream consults the schema or config again.

#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub name: String,
    pub decls: Vec<Decl>,    // sorted by name for deterministic output
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Struct(StructDecl),      // OBJECT, INTERFACE, INPUT_OBJECT
    Enum(EnumDecl),
    Scalar(ScalarDecl),      // custom scalars and unions: a named alias
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<StructField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub name: String,
    pub type_expr: String,   // e.g. `[]*Foo`, `string`, or an override verbatim
    pub tags: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub const_name: String,
    pub value: String,
    pub description: Option<String>,
    pub deprecation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarDecl {
    pub name: String,
    pub description: Option<String>,
    pub underlying: String,
}

impl Decl {
    pub fn name(&self) -> &str {
        match self {
            Decl::Struct(s) => &s.name,
            Decl::Enum(e) => &e.name,
            Decl::Scalar(s) => &s.name,
        }
    }
}

impl Package {
    pub fn decl(&self, name: &str) -> Option<&Decl> {
        self.decls.iter().find(|d| d.name() == name)
    }
}
