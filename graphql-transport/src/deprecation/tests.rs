use apollo_compiler::Schema;
use apollo_compiler::ast::Document;
use apollo_compiler::validation::Valid;
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

use super::*;

const SCHEMA: &str = r#"
directive @tag(size: ImageSize) on QUERY | FIELD | FRAGMENT_SPREAD | INLINE_FRAGMENT | FRAGMENT_DEFINITION

type Query {
  user(id: ID!): User
  oldUser(id: ID!): User @deprecated(reason: "use user instead")
  users(filter: UserFilter, role: Role, roles: [Role!]): [User!]!
  node: Node
  search(query: JSON): [User!]!
}

type Mutation {
  updateUser(id: ID!, role: Role): User
}

interface Node {
  id: ID!
}

type User implements Node {
  id: ID!
  name: String
  nickname: String @deprecated
  legacyId: ID @deprecated(reason: "")
  avatar(size: ImageSize = SMALL): String
}

enum Role {
  ADMIN
  MEMBER
  GUEST @deprecated(reason: "guests were removed")
}

enum ImageSize {
  SMALL
  LARGE
  HUGE @deprecated(reason: "too big")
}

input UserFilter {
  name: String
  role: Role
  nested: UserFilter
}

scalar JSON
"#;

fn schema() -> Valid<Schema> {
    Schema::parse_and_validate(SCHEMA, "schema.graphql").unwrap()
}

fn notices(query: &str) -> Vec<DeprecationNotice> {
    let schema = schema();
    let document = Document::parse(query, "query.graphql").unwrap();
    DeprecationVisitor::new(&schema, "app/query.rb", 0)
        .visit(&document)
        .unwrap()
        .collect()
}

fn names(query: &str) -> Vec<String> {
    notices(query)
        .into_iter()
        .map(|notice| notice.qualified_name)
        .collect()
}

fn error(query: &str) -> DeprecationError {
    let schema = schema();
    let document = Document::parse(query, "query.graphql").unwrap();
    DeprecationVisitor::new(&schema, "app/query.rb", 0)
        .visit(&document)
        .unwrap_err()
}

#[test]
fn test_deprecated_field() {
    let notices = notices("{ oldUser(id: 1) { name } user(id: 2) { name } }");

    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].qualified_name, "Query.oldUser");
    assert_eq!(notices[0].reason, "use user instead");
    assert_eq!(notices[0].source_file, "app/query.rb");
}

#[test]
fn test_undeprecated_usage_is_silent() {
    assert!(
        names("{ user(id: 1) { id name avatar(size: LARGE) } users(role: ADMIN) { id } }")
            .is_empty()
    );
}

#[test]
fn test_default_and_empty_reasons() {
    let notices = notices("{ user(id: 1) { nickname legacyId } }");

    assert_eq!(notices[0].qualified_name, "User.nickname");
    assert_eq!(notices[0].reason, DEFAULT_DEPRECATION_REASON);
    assert_eq!(notices[1].qualified_name, "User.legacyId");
    assert_eq!(notices[1].reason, "");
}

#[test]
fn test_deprecated_enum_values() {
    assert_eq!(names("{ users(role: GUEST) { id } }"), ["Role.GUEST"]);
    assert_eq!(
        names("{ user(id: 1) { avatar(size: HUGE) } }"),
        ["ImageSize.HUGE"]
    );
}

#[test]
fn test_enum_values_in_lists() {
    assert_eq!(
        names("{ users(roles: [ADMIN, GUEST, MEMBER, GUEST]) { id } }"),
        ["Role.GUEST", "Role.GUEST"]
    );
}

#[test]
fn test_enum_values_in_input_objects() {
    assert_eq!(
        names(r#"{ users(filter: { name: "x", nested: { nested: { role: GUEST } } }) { id } }"#),
        ["Role.GUEST"]
    );
}

#[test]
fn test_variables_and_custom_scalars_are_skipped() {
    assert!(names("query($role: Role) { users(role: $role) { id } }").is_empty());
    assert!(names("{ search(query: { role: GUEST, tags: [HUGE] }) { id } }").is_empty());
}

#[test]
fn test_directive_arguments() {
    assert_eq!(
        names(
            "query Tagged @tag(size: HUGE) {
                user(id: 1) @tag(size: HUGE) @include(if: true) { id }
            }"
        ),
        ["ImageSize.HUGE", "ImageSize.HUGE"]
    );
}

#[test]
fn test_fragments() {
    let query = "
        query {
          node {
            ...UserParts @tag(size: HUGE)
            ... on User { nickname }
            ... { __typename }
          }
        }

        fragment UserParts on User {
          oldNickname: nickname
          avatar(size: HUGE)
        }
    ";

    assert_eq!(
        names(query),
        [
            "ImageSize.HUGE",
            "User.nickname",
            "User.nickname",
            "ImageSize.HUGE",
        ]
    );
}

#[test]
fn test_mutation() {
    assert_eq!(
        names("mutation { updateUser(id: 1, role: GUEST) { nickname } }"),
        ["Role.GUEST", "User.nickname"]
    );
}

#[test]
fn test_schema_mismatches() {
    assert_eq!(
        error("{ missing }"),
        DeprecationError::UnknownField {
            type_name: "Query".to_string(),
            field: "missing".to_string(),
        }
    );
    assert_eq!(
        error("subscription { user(id: 1) { id } }"),
        DeprecationError::MissingRootOperation {
            operation_type: "subscription".to_string(),
        }
    );
    assert_eq!(
        error("{ user(id: 1) @nope { id } }"),
        DeprecationError::UnknownDirective {
            name: "nope".to_string(),
        }
    );
    assert_eq!(
        error("{ user(uuid: 1) { id } }"),
        DeprecationError::UnknownArgument {
            owner: "Query.user".to_string(),
            name: "uuid".to_string(),
        }
    );
    assert_eq!(
        error("{ users(filter: { age: 3 }) { id } }"),
        DeprecationError::UnknownArgument {
            owner: "UserFilter".to_string(),
            name: "age".to_string(),
        }
    );
    assert_eq!(
        error("{ users(role: OWNER) { id } }"),
        DeprecationError::UnknownEnumValue {
            enum_type: "Role".to_string(),
            value: "OWNER".to_string(),
        }
    );
    assert_eq!(
        error("{ users(filter: LARGE) { id } }"),
        DeprecationError::NotAnEnum {
            name: "UserFilter".to_string(),
        }
    );
    assert_eq!(
        error("fragment F on Robot { id }"),
        DeprecationError::UnknownType {
            name: "Robot".to_string(),
        }
    );
    assert_eq!(
        error("{ missing }").to_string(),
        "no field `missing` in type `Query`"
    );
}

#[test]
fn test_line_numbers() {
    let schema = schema();
    let query = "query {\n  user(id: 1) {\n    nickname\n    avatar(\n      size: HUGE\n    )\n  }\n}\n";
    let document = Document::parse(query, "query.graphql").unwrap();

    let notices: Vec<_> = DeprecationVisitor::new(&schema, "app/views/users.rb", 10)
        .visit(&document)
        .unwrap()
        .collect();

    assert_eq!(
        notices
            .iter()
            .map(|notice| notice.line_number)
            .collect::<Vec<_>>(),
        [13, 15]
    );
    insta::assert_snapshot!(
        notices[0].to_string(),
        @"GRAPHQL DEPRECATION WARNING: User.nickname is deprecated with reason: 'No longer supported': app/views/users.rb:13"
    );
}

#[test]
fn test_visitor_is_reusable() {
    let schema = schema();
    let visitor = DeprecationVisitor::new(&schema, "app/query.rb", 0);
    let first = Document::parse("{ oldUser(id: 1) { nickname } }", "first.graphql").unwrap();
    let second = Document::parse("{ users(role: GUEST) { id } }", "second.graphql").unwrap();

    let deprecations = visitor.visit(&first).unwrap();
    assert_eq!(deprecations.len(), 2);
    assert_eq!(visitor.visit(&second).unwrap().count(), 1);
    assert_eq!(visitor.visit(&first).unwrap().count(), 2);
}

#[test]
fn test_report_streams_until_an_error() {
    let schema = schema();
    let document = Document::parse(
        "{ oldUser(id: 1) { id } } query Other { missing }",
        "query.graphql",
    )
    .unwrap();

    let mut reported = Vec::new();
    let result =
        DeprecationVisitor::new(&schema, "app/query.rb", 0).report(&document, &mut reported);

    assert!(matches!(result, Err(DeprecationError::UnknownField { .. })));
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].qualified_name, "Query.oldUser");
}

#[test]
#[traced_test]
fn test_tracing_reporter() {
    let schema = schema();
    let document = Document::parse("{ oldUser(id: 1) { id } }", "query.graphql").unwrap();

    DeprecationVisitor::new(&schema, "app/query.rb", 0)
        .report(&document, &mut TracingReporter)
        .unwrap();

    assert!(logs_contain(
        "GRAPHQL DEPRECATION WARNING: Query.oldUser is deprecated with reason: 'use user instead': app/query.rb:1"
    ));
}
