use std::collections::HashMap;
use std::fmt;

use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::Schema;
use apollo_compiler::ast;
use apollo_compiler::schema::EnumType;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::FieldLookupError;
use apollo_compiler::schema::InputObjectType;

use super::DEFAULT_DEPRECATION_REASON;
use super::DeprecationNotice;
use super::DeprecationReporter;
use crate::error::DeprecationError;

/// Whose declared arguments the arguments being visited are checked against.
#[derive(Clone, Copy)]
enum ArgumentOwner<'a> {
    Field {
        type_name: &'a str,
        definition: &'a ast::FieldDefinition,
    },
    Directive(&'a ast::DirectiveDefinition),
    InputObject {
        name: &'a str,
        definition: &'a InputObjectType,
    },
}

impl<'a> ArgumentOwner<'a> {
    fn argument(self, name: &str) -> Option<&'a ast::InputValueDefinition> {
        match self {
            ArgumentOwner::Field { definition, .. } => find_argument(&definition.arguments, name),
            ArgumentOwner::Directive(definition) => find_argument(&definition.arguments, name),
            ArgumentOwner::InputObject { definition, .. } => {
                let field: &'a ast::InputValueDefinition = definition.fields.get(name)?;
                Some(field)
            }
        }
    }
}

impl fmt::Display for ArgumentOwner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentOwner::Field {
                type_name,
                definition,
            } => write!(f, "{type_name}.{}", definition.name),
            ArgumentOwner::Directive(definition) => write!(f, "@{}", definition.name),
            ArgumentOwner::InputObject { name, .. } => write!(f, "{name}"),
        }
    }
}

fn find_argument<'a>(
    arguments: &'a [Node<ast::InputValueDefinition>],
    name: &str,
) -> Option<&'a ast::InputValueDefinition> {
    for argument in arguments {
        if argument.name.as_str() == name {
            return Some(&**argument);
        }
    }
    None
}

/// The reason of a `@deprecated` directive, if there is one in `directives`.
fn deprecation_reason(directives: &ast::DirectiveList) -> Option<&str> {
    let deprecated = directives.get("deprecated")?;
    Some(
        deprecated
            .specified_argument_by_name("reason")
            .and_then(|reason| reason.as_str())
            .unwrap_or(DEFAULT_DEPRECATION_REASON),
    )
}

/// One walk over a document.
///
/// The enclosing type and argument owner are passed down the recursion. Schema
/// lookups for enums and directives are cached for the duration of the walk.
pub(super) struct Traversal<'a, R: ?Sized> {
    schema: &'a Schema,
    document: &'a ast::Document,
    source_file: &'a str,
    line_number: usize,
    reporter: &'a mut R,
    enum_types: HashMap<&'a str, &'a EnumType>,
    directives: HashMap<&'a str, &'a ast::DirectiveDefinition>,
}

impl<'a, R> Traversal<'a, R>
where
    R: DeprecationReporter + ?Sized,
{
    pub(super) fn new(
        schema: &'a Schema,
        document: &'a ast::Document,
        source_file: &'a str,
        line_number: usize,
        reporter: &'a mut R,
    ) -> Self {
        Self {
            schema,
            document,
            source_file,
            line_number,
            reporter,
            enum_types: HashMap::new(),
            directives: HashMap::new(),
        }
    }

    pub(super) fn document(mut self) -> Result<(), DeprecationError> {
        let document = self.document;
        document
            .definitions
            .iter()
            .try_for_each(|definition| match definition {
                ast::Definition::OperationDefinition(operation) => self.operation(operation),
                ast::Definition::FragmentDefinition(fragment) => {
                    self.fragment_definition(fragment)
                }
                _ => Ok(()),
            })
    }

    fn operation(
        &mut self,
        operation: &'a ast::OperationDefinition,
    ) -> Result<(), DeprecationError> {
        let root_type = self
            .schema
            .root_operation(operation.operation_type)
            .ok_or_else(|| DeprecationError::MissingRootOperation {
                operation_type: match operation.operation_type {
                    ast::OperationType::Query => "query",
                    ast::OperationType::Mutation => "mutation",
                    ast::OperationType::Subscription => "subscription",
                }
                .to_string(),
            })?;
        self.directives(&operation.directives)?;
        self.selection_set(root_type.as_str(), &operation.selection_set)
    }

    fn fragment_definition(
        &mut self,
        fragment: &'a ast::FragmentDefinition,
    ) -> Result<(), DeprecationError> {
        if !self.schema.types.contains_key(fragment.type_condition.as_str()) {
            return Err(DeprecationError::UnknownType {
                name: fragment.type_condition.to_string(),
            });
        }
        self.directives(&fragment.directives)?;
        self.selection_set(fragment.type_condition.as_str(), &fragment.selection_set)
    }

    fn selection_set(
        &mut self,
        parent_type: &'a str,
        set: &'a [ast::Selection],
    ) -> Result<(), DeprecationError> {
        set.iter().try_for_each(|selection| match selection {
            ast::Selection::Field(field) => self.field(parent_type, field),
            // definitions are visited on their own
            ast::Selection::FragmentSpread(spread) => self.directives(&spread.directives),
            ast::Selection::InlineFragment(inline) => {
                let fragment_type = inline.type_condition.as_deref().unwrap_or(parent_type);
                self.directives(&inline.directives)?;
                self.selection_set(fragment_type, &inline.selection_set)
            }
        })
    }

    fn field(
        &mut self,
        parent_type: &'a str,
        field: &'a Node<ast::Field>,
    ) -> Result<(), DeprecationError> {
        let definition: &'a ast::FieldDefinition = self
            .schema
            .type_field(parent_type, &field.name)
            .map_err(|error| match error {
                FieldLookupError::NoSuchType => DeprecationError::UnknownType {
                    name: parent_type.to_string(),
                },
                FieldLookupError::NoSuchField(_, _) => DeprecationError::UnknownField {
                    type_name: parent_type.to_string(),
                    field: field.name.to_string(),
                },
            })?;

        if let Some(reason) = deprecation_reason(&definition.directives) {
            let line = self.line(field);
            self.report(format!("{parent_type}.{}", field.name), reason, line);
        }

        let owner = ArgumentOwner::Field {
            type_name: parent_type,
            definition,
        };
        self.arguments(owner, &field.arguments)?;
        self.directives(&field.directives)?;
        self.selection_set(definition.ty.inner_named_type().as_str(), &field.selection_set)
    }

    fn directives(&mut self, directives: &'a ast::DirectiveList) -> Result<(), DeprecationError> {
        directives.iter().try_for_each(|directive| {
            let definition = self.directive_definition(directive.name.as_str())?;
            self.arguments(ArgumentOwner::Directive(definition), &directive.arguments)
        })
    }

    fn arguments(
        &mut self,
        owner: ArgumentOwner<'a>,
        arguments: &'a [Node<ast::Argument>],
    ) -> Result<(), DeprecationError> {
        arguments.iter().try_for_each(|argument| {
            let definition =
                owner
                    .argument(&argument.name)
                    .ok_or_else(|| DeprecationError::UnknownArgument {
                        owner: owner.to_string(),
                        name: argument.name.to_string(),
                    })?;
            self.value(definition.ty.inner_named_type().as_str(), &argument.value)
        })
    }

    fn value(
        &mut self,
        input_type: &'a str,
        value: &'a Node<ast::Value>,
    ) -> Result<(), DeprecationError> {
        match &**value {
            ast::Value::Enum(name) => self.enum_value(input_type, name, value),
            ast::Value::List(items) => items
                .iter()
                .try_for_each(|item| self.value(input_type, item)),
            ast::Value::Object(fields) => {
                // scalars may accept object literals
                let Some(definition) = self.input_object(input_type)? else {
                    return Ok(());
                };
                let owner = ArgumentOwner::InputObject {
                    name: input_type,
                    definition,
                };
                fields.iter().try_for_each(|(name, field_value)| {
                    let field = owner.argument(name).ok_or_else(|| {
                        DeprecationError::UnknownArgument {
                            owner: owner.to_string(),
                            name: name.to_string(),
                        }
                    })?;
                    self.value(field.ty.inner_named_type().as_str(), field_value)
                })
            }
            _ => Ok(()),
        }
    }

    fn enum_value(
        &mut self,
        enum_type: &'a str,
        name: &Name,
        node: &Node<ast::Value>,
    ) -> Result<(), DeprecationError> {
        let Some(definition) = self.enum_type(enum_type)? else {
            return Ok(());
        };
        let value = definition.values.get(name.as_str()).ok_or_else(|| {
            DeprecationError::UnknownEnumValue {
                enum_type: enum_type.to_string(),
                value: name.to_string(),
            }
        })?;
        if let Some(reason) = deprecation_reason(&value.directives) {
            let line = self.line(node);
            self.report(format!("{enum_type}.{name}"), reason, line);
        }
        Ok(())
    }

    /// `None` for custom scalars, which take enum literals as is.
    fn enum_type(&mut self, name: &'a str) -> Result<Option<&'a EnumType>, DeprecationError> {
        if let Some(enum_type) = self.enum_types.get(name) {
            return Ok(Some(*enum_type));
        }
        match self.schema.types.get(name) {
            Some(ExtendedType::Enum(enum_type)) => {
                let enum_type: &'a EnumType = enum_type;
                self.enum_types.insert(name, enum_type);
                Ok(Some(enum_type))
            }
            Some(ExtendedType::Scalar(_)) => Ok(None),
            Some(_) => Err(DeprecationError::NotAnEnum {
                name: name.to_string(),
            }),
            None => Err(DeprecationError::UnknownType {
                name: name.to_string(),
            }),
        }
    }

    fn input_object(&self, name: &str) -> Result<Option<&'a InputObjectType>, DeprecationError> {
        match self.schema.types.get(name) {
            Some(ExtendedType::InputObject(input_object)) => Ok(Some(&**input_object)),
            Some(_) => Ok(None),
            None => Err(DeprecationError::UnknownType {
                name: name.to_string(),
            }),
        }
    }

    fn directive_definition(
        &mut self,
        name: &'a str,
    ) -> Result<&'a ast::DirectiveDefinition, DeprecationError> {
        if let Some(definition) = self.directives.get(name) {
            return Ok(*definition);
        }
        let definition: &'a ast::DirectiveDefinition = self
            .schema
            .directive_definitions
            .get(name)
            .ok_or_else(|| DeprecationError::UnknownDirective {
                name: name.to_string(),
            })?;
        self.directives.insert(name, definition);
        Ok(definition)
    }

    fn line<T>(&self, node: &Node<T>) -> usize {
        let line = node
            .location()
            .and_then(|location| location.line_column_range(&self.document.sources))
            .map(|range| range.start.line)
            .unwrap_or_default();
        self.line_number + line
    }

    fn report(&mut self, qualified_name: String, reason: &str, line_number: usize) {
        self.reporter.report(DeprecationNotice {
            qualified_name,
            reason: reason.to_string(),
            source_file: self.source_file.to_string(),
            line_number,
        });
    }
}
