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

use models::Pet;

/// Container holding pet documents
pub const CONTAINER: &str = "pets";

/// Pets module: CRUD over the `pets` container
pub struct PetsModule {
    repo: Repository<Pet>,
}

impl PetsModule {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            repo: Repository::new(store, CONTAINER),
        }
    }
}

#[async_trait]
impl Module for PetsModule {
    fn name(&self) -> &'static str {
        "pets"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            container = self.repo.container(),
            "pets module initialized"
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
}

/// Create a new instance of the pets module
pub fn create_module(store: Arc<dyn DocumentStore>) -> Arc<dyn Module> {
    Arc::new(PetsModule::new(store))
}

fn openapi_fragment() -> serde_json::Value {
    let text = |description: &str| {
        json!({
            "description": description,
            "content": { "text/plain": { "schema": { "type": "string" } } }
        })
    };
    let pet = |description: &str| {
        json!({
            "description": description,
            "content": {
                "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } }
            }
        })
    };
    let id_param = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string", "format": "uuid" }
    });
    let input_body = json!({
        "required": true,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/PetInput" } }
        }
    });

    json!({
        "paths": {
            "/pets": {
                "get": {
                    "summary": "List pets",
                    "tags": ["Pets"],
                    "responses": {
                        "200": {
                            "description": "All pets",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Pet" }
                                    }
                                }
                            }
                        },
                        "500": text("Storage failure")
                    }
                },
                "post": {
                    "summary": "Create a pet",
                    "tags": ["Pets"],
                    "requestBody": input_body,
                    "responses": {
                        "201": pet("Created pet"),
                        "400": text("Missing payload or name"),
                        "500": text("Decoding or storage failure")
                    }
                }
            },
            "/pets/{id}": {
                "get": {
                    "summary": "Get a pet",
                    "tags": ["Pets"],
                    "parameters": [id_param],
                    "responses": {
                        "200": pet("The pet"),
                        "404": text("Unknown id"),
                        "500": text("Storage failure")
                    }
                },
                "put": {
                    "summary": "Update a pet; omitted breed, age, color, and weight are cleared",
                    "tags": ["Pets"],
                    "parameters": [id_param],
                    "requestBody": input_body,
                    "responses": {
                        "200": pet("Updated pet"),
                        "404": text("Unknown id"),
                        "500": text("Decoding or storage failure")
                    }
                },
                "delete": {
                    "summary": "Delete a pet",
                    "tags": ["Pets"],
                    "parameters": [id_param],
                    "responses": {
                        "204": { "description": "Deleted" },
                        "404": text("Unknown id"),
                        "500": text("Storage failure")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Pet": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "format": "uuid" },
                        "name": { "type": "string" },
                        "species": { "type": ["string", "null"] },
                        "breed": { "type": ["string", "null"] },
                        "age": { "type": ["integer", "null"] },
                        "color": { "type": ["string", "null"] },
                        "weight": { "type": ["number", "null"] },
                        "status": { "type": "string", "default": "available" },
                        "createdAt": { "type": "string", "format": "date-time" },
                        "updatedAt": { "type": "string", "format": "date-time" }
                    },
                    "required": ["id", "name", "status", "createdAt", "updatedAt"]
                },
                "PetInput": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "species": { "type": "string" },
                        "breed": { "type": "string" },
                        "age": { "type": "integer" },
                        "color": { "type": "string" },
                        "weight": { "type": "number" },
                        "status": { "type": "string" }
                    }
                }
            }
        }
    })
}
