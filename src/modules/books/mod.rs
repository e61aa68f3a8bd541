pub mod merge;
pub mod models;
pub mod routes;
pub mod validation;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use catalog_db::{DocumentStore, Repository};
use catalog_kernel::{ContainerSpec, InitCtx, Module};
use serde_json::json;

use models::Book;

/// Container holding book documents
pub const CONTAINER: &str = "books";

/// Books module: CRUD over the `books` container
pub struct BooksModule {
    repo: Repository<Book>,
}

impl BooksModule {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repo: Repository::new(store, CONTAINER),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            container = self.repo.container(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.repo.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    fn containers(&self) -> Vec<ContainerSpec> {
        vec![ContainerSpec::keyed_by_id(CONTAINER)]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(store: Arc<dyn DocumentStore>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store))
}

fn text_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": { "text/plain": { "schema": { "type": "string" } } }
    })
}

fn book_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/Book" } }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let id_param = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    });
    let input_body = json!({
        "required": true,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/BookInput" } }
        }
    });

    json!({
        "paths": {
            "/books": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "All books",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            }
                        },
                        "500": text_response("Storage failure")
                    }
                },
                "post": {
                    "summary": "Create a book",
                    "tags": ["Books"],
                    "requestBody": input_body,
                    "responses": {
                        "201": book_response("Created book"),
                        "400": text_response("First failed validation rule"),
                        "500": text_response("Decoding or storage failure")
                    }
                }
            },
            "/books/{id}": {
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "parameters": [id_param],
                    "responses": {
                        "200": book_response("The book"),
                        "404": text_response("Unknown id"),
                        "500": text_response("Storage failure")
                    }
                },
                "put": {
                    "summary": "Update a book; blank or absent fields keep their value",
                    "tags": ["Books"],
                    "parameters": [id_param],
                    "requestBody": input_body,
                    "responses": {
                        "200": book_response("Updated book"),
                        "400": text_response("Null payload"),
                        "404": text_response("Unknown id"),
                        "500": text_response("Decoding or storage failure")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "parameters": [id_param],
                    "responses": {
                        "204": { "description": "Deleted" },
                        "404": text_response("Unknown id"),
                        "500": text_response("Storage failure")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Author": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" }
                    },
                    "required": ["id", "name"]
                },
                "Price": {
                    "type": "object",
                    "properties": {
                        "amount": { "type": ["number", "null"] },
                        "currency": { "type": ["string", "null"] }
                    }
                },
                "Book": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "description": "book-<n>" },
                        "isbn": { "type": "string" },
                        "title": { "type": "string" },
                        "author": { "$ref": "#/components/schemas/Author" },
                        "categories": { "type": "array", "items": { "type": "string" } },
                        "publicationYear": { "type": "integer" },
                        "language": { "type": "string" },
                        "pages": { "type": ["integer", "null"] },
                        "publisher": { "type": ["string", "null"] },
                        "description": { "type": ["string", "null"] },
                        "coverImage": { "type": ["string", "null"] },
                        "available": { "type": "boolean" },
                        "rating": { "type": ["number", "null"] },
                        "reviewCount": { "type": "integer" },
                        "price": {
                            "oneOf": [
                                { "$ref": "#/components/schemas/Price" },
                                { "type": "null" }
                            ]
                        },
                        "createdAt": { "type": "string", "format": "date-time" },
                        "updatedAt": { "type": "string", "format": "date-time" }
                    },
                    "required": [
                        "id", "isbn", "title", "author", "categories", "publicationYear",
                        "language", "available", "reviewCount", "createdAt", "updatedAt"
                    ]
                },
                "BookInput": {
                    "type": "object",
                    "properties": {
                        "isbn": { "type": "string" },
                        "title": { "type": "string" },
                        "author": { "$ref": "#/components/schemas/Author" },
                        "categories": { "type": "array", "items": { "type": "string" } },
                        "publicationYear": { "type": "integer" },
                        "language": { "type": "string" },
                        "pages": { "type": "integer" },
                        "publisher": { "type": "string" },
                        "description": { "type": "string" },
                        "coverImage": { "type": "string" },
                        "available": { "type": "boolean" },
                        "rating": { "type": "number" },
                        "reviewCount": { "type": "integer" },
                        "price": { "$ref": "#/components/schemas/Price" }
                    }
                }
            }
        }
    })
}
