//! Operation signatures described with schema fields.
//!
//! A [`FunctionField`] pairs an argument schema with a return schema so that
//! transport layers (RPC routers, endpoint generators) can describe a typed
//! operation without the engine ever recursing into it. An [`Interface`]
//! groups named function fields into a whole service surface. Both are
//! descriptive only - no runtime conversion behavior lives here.

use crate::field::Field;

/// One typed operation: argument schema in, return schema out.
#[derive(Debug, Clone)]
pub struct FunctionField {
    argument: Field,
    returns: Field,
}

impl FunctionField {
    pub fn new(argument: Field, returns: Field) -> Self {
        FunctionField { argument, returns }
    }

    pub fn argument(&self) -> &Field {
        &self.argument
    }

    pub fn returns(&self) -> &Field {
        &self.returns
    }
}

/// Named collection of operations, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Interface {
    operations: Vec<(String, FunctionField)>,
}

impl Interface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation; last declaration wins on name collision.
    pub fn operation(mut self, name: impl Into<String>, function: FunctionField) -> Self {
        let name = name.into();
        self.operations.retain(|(existing, _)| *existing != name);
        self.operations.push((name, function));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FunctionField> {
        self.operations
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, function)| function)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FunctionField)> {
        self.operations
            .iter()
            .map(|(name, function)| (name.as_str(), function))
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    #[test]
    fn function_field_keeps_both_sides() {
        let function = FunctionField::new(Field::text(), Field::integer());
        assert!(matches!(function.argument().kind(), FieldKind::Text));
        assert!(matches!(function.returns().kind(), FieldKind::Integer));
    }

    #[test]
    fn interface_lookup_and_order() {
        let interface = Interface::new()
            .operation("create", FunctionField::new(Field::object([("name", Field::text())]), Field::integer()))
            .operation("delete", FunctionField::new(Field::integer(), Field::void()));

        assert_eq!(interface.len(), 2);
        assert!(interface.get("create").is_some());
        assert!(interface.get("missing").is_none());

        let names: Vec<&str> = interface.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["create", "delete"]);
    }

    #[test]
    fn redeclared_operation_replaces_earlier_one() {
        let interface = Interface::new()
            .operation("ping", FunctionField::new(Field::void(), Field::void()))
            .operation("ping", FunctionField::new(Field::void(), Field::integer()));

        assert_eq!(interface.len(), 1);
        let function = interface.get("ping").unwrap();
        assert!(matches!(function.returns().kind(), FieldKind::Integer));
    }
}
