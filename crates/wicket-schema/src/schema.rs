use serde::{Deserialize, Serialize};

/// Declared resource schema: the fields a resource type exposes to clients,
/// each mapped to its underlying model-level field.
///
/// Declaration order is preserved; lookups are linear over the field list,
/// which is small in practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub type_name: String,
    pub fields: Vec<FieldDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub model_field: String,
    #[serde(default)]
    pub relationship: Option<Relationship>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub related_type: String,
    pub many: bool,
}

impl Schema {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Declare a scalar attribute exposed as `name`, stored as `model_field`.
    pub fn attribute(mut self, name: impl Into<String>, model_field: impl Into<String>) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            model_field: model_field.into(),
            relationship: None,
        });
        self
    }

    /// Declare a to-one relationship to `related_type`, joined through
    /// `model_field`.
    pub fn to_one(
        mut self,
        name: impl Into<String>,
        model_field: impl Into<String>,
        related_type: impl Into<String>,
    ) -> Self {
        self.push_relationship(name, model_field, related_type, false);
        self
    }

    /// Declare a to-many relationship to `related_type`.
    pub fn to_many(
        mut self,
        name: impl Into<String>,
        model_field: impl Into<String>,
        related_type: impl Into<String>,
    ) -> Self {
        self.push_relationship(name, model_field, related_type, true);
        self
    }

    fn push_relationship(
        &mut self,
        name: impl Into<String>,
        model_field: impl Into<String>,
        related_type: impl Into<String>,
        many: bool,
    ) {
        self.fields.push(FieldDef {
            name: name.into(),
            model_field: model_field.into(),
            relationship: Some(Relationship {
                related_type: related_type.into(),
                many,
            }),
        });
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.field(name).and_then(|f| f.relationship.as_ref())
    }

    pub fn is_relationship(&self, name: &str) -> bool {
        self.relationship(name).is_some()
    }

    /// Model-level field backing the declared field, if declared.
    pub fn model_field(&self, name: &str) -> Option<&str> {
        self.field(name).map(|f| f.model_field.as_str())
    }
}
