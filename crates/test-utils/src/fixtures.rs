//! Minimal valid OpenAPI documents to build test inputs on
use openapi_document::{ApiItem, ApiObject, ApiSpec};
use serde_json::{json, Value};

/// Wrap `body` in a valid OpenAPI 3.0 document.
///
/// `openapi` and `info` are filled in; top-level keys in `body` are added
/// after them and override them.
///
/// # Panics
///
/// If `body` is not a JSON object.
#[must_use]
pub fn spec(body: Value) -> ApiSpec {
    let Value::Object(entries) = body else {
        panic!("fixture body must be a JSON object, got {body}");
    };

    let mut root: ApiObject = [
        ("openapi", ApiItem::from("3.0.0")),
        ("info", ApiItem::from(json!({ "title": "abc", "version": "1.0.0" }))),
    ]
    .into_iter()
    .collect();
    for (key, value) in entries {
        root.insert(key, ApiItem::from(value));
    }

    ApiSpec::new(ApiItem::Object(root)).expect("fixture root is an object")
}

/// Document whose only operation, `GET /test`, answers 200 with `content`
#[must_use]
pub fn response_content(content: Value) -> ApiSpec {
    spec(json!({
        "paths": {
            "/test": {
                "get": {
                    "responses": {
                        "200": {
                            "description": "abc",
                            "content": content
                        }
                    }
                }
            }
        }
    }))
}

/// Document with no paths and the given `components.schemas`
#[must_use]
pub fn schemas(schemas: Value) -> ApiSpec {
    spec(json!({
        "paths": {},
        "components": { "schemas": schemas }
    }))
}
