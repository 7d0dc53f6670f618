use std::fmt::{self, Display, Write as _};

use super::{value::write_string_literal, *};

const INDENT: &str = "  ";

impl Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        if let Some(schema_definition) = &self.schema_definition {
            separate(&mut first, f)?;
            write!(f, "{schema_definition}")?;
        }

        for directive_definition in &self.directive_definitions {
            separate(&mut first, f)?;
            write!(f, "{directive_definition}")?;
        }

        for definition in self.types.values() {
            separate(&mut first, f)?;
            write!(f, "{definition}")?;
        }

        for extension in &self.extensions {
            separate(&mut first, f)?;
            write!(f, "extend {extension}")?;
        }

        Ok(())
    }
}

impl Display for SchemaDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("schema")?;
        write_directives(&self.directives, f)?;
        f.write_str(" {\n")?;

        let roots = [
            ("query", &self.query),
            ("mutation", &self.mutation),
            ("subscription", &self.subscription),
        ];

        for (operation, type_name) in roots {
            if let Some(type_name) = type_name {
                writeln!(f, "{INDENT}{operation}: {type_name}")?;
            }
        }

        f.write_str("}\n")
    }
}

impl Display for DirectiveDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "directive @{}", self.name)?;
        write_arguments_definition(&self.arguments, f)?;

        if self.repeatable {
            f.write_str(" repeatable")?;
        }

        f.write_str(" on ")?;

        for (idx, location) in self.locations.iter().enumerate() {
            if idx > 0 {
                f.write_str(" | ")?;
            }
            f.write_str(location.as_str())?;
        }

        f.write_str("\n")
    }
}

impl Display for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDefinition::Scalar(scalar) => {
                write_description(scalar.description.as_deref(), "", f)?;
                write!(f, "scalar {}", scalar.name)?;
                write_directives(&scalar.directives, f)?;
                f.write_str("\n")
            }
            TypeDefinition::Object(object) => write_object_like("type", object, f),
            TypeDefinition::Interface(interface) => write_object_like("interface", interface, f),
            TypeDefinition::Union(union) => {
                write_description(union.description.as_deref(), "", f)?;
                write!(f, "union {}", union.name)?;
                write_directives(&union.directives, f)?;

                for (idx, member) in union.members.iter().enumerate() {
                    f.write_str(if idx == 0 { " = " } else { " | " })?;
                    f.write_str(member)?;
                }

                f.write_str("\n")
            }
            TypeDefinition::Enum(enm) => {
                write_description(enm.description.as_deref(), "", f)?;
                write!(f, "enum {}", enm.name)?;
                write_directives(&enm.directives, f)?;
                f.write_str(" {\n")?;

                for value in &enm.values {
                    write_description(value.description.as_deref(), INDENT, f)?;
                    write!(f, "{INDENT}{}", value.value)?;
                    write_directives(&value.directives, f)?;
                    f.write_str("\n")?;
                }

                f.write_str("}\n")
            }
            TypeDefinition::InputObject(input) => {
                write_description(input.description.as_deref(), "", f)?;
                write!(f, "input {}", input.name)?;
                write_directives(&input.directives, f)?;
                f.write_str(" {\n")?;

                for field in &input.fields {
                    write_description(field.description.as_deref(), INDENT, f)?;
                    writeln!(f, "{INDENT}{field}")?;
                }

                f.write_str("}\n")
            }
        }
    }
}

fn separate(first: &mut bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if std::mem::take(first) {
        Ok(())
    } else {
        f.write_str("\n")
    }
}

fn write_object_like(keyword: &str, object: &ObjectDefinition, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write_description(object.description.as_deref(), "", f)?;
    write!(f, "{keyword} {}", object.name)?;

    for (idx, interface) in object.implements_interfaces.iter().enumerate() {
        f.write_str(if idx == 0 { " implements " } else { " & " })?;
        f.write_str(interface)?;
    }

    write_directives(&object.directives, f)?;
    f.write_str(" {\n")?;

    for field in &object.fields {
        write_description(field.description.as_deref(), INDENT, f)?;
        writeln!(f, "{INDENT}{field}")?;
    }

    f.write_str("}\n")
}

impl Display for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        write_arguments_definition(&self.arguments, f)?;
        write!(f, ": {}", self.ty)?;
        write_directives(&self.directives, f)
    }
}

impl Display for InputValueDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)?;

        if let Some(default_value) = &self.default_value {
            write!(f, " = {default_value}")?;
        }

        write_directives(&self.directives, f)
    }
}

impl Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;

        if self.arguments.is_empty() {
            return Ok(());
        }

        f.write_str("(")?;

        for (idx, (name, value)) in self.arguments.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }

        f.write_str(")")
    }
}

fn write_arguments_definition(arguments: &[InputValueDefinition], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if arguments.is_empty() {
        return Ok(());
    }

    f.write_str("(")?;

    for (idx, argument) in arguments.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }

        if let Some(description) = &argument.description {
            write_string_literal(description, f)?;
            f.write_char(' ')?;
        }

        write!(f, "{argument}")?;
    }

    f.write_str(")")
}

fn write_directives(directives: &[Directive], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for directive in directives {
        write!(f, " {directive}")?;
    }

    Ok(())
}

fn write_description(description: Option<&str>, indent: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let Some(description) = description else {
        return Ok(());
    };

    if !description.contains('\n') {
        f.write_str(indent)?;
        write_string_literal(description, f)?;
        return f.write_str("\n");
    }

    writeln!(f, "{indent}\"\"\"")?;

    for line in description.lines() {
        if line.is_empty() {
            f.write_str("\n")?;
        } else {
            writeln!(f, "{indent}{}", line.replace("\"\"\"", "\\\"\"\""))?;
        }
    }

    writeln!(f, "{indent}\"\"\"")
}
