//! In-memory SQLite fixtures shared by the unit tests.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};

use crate::db::entities::prelude::{Palette, Project};
use crate::db::services::{palette_service, palette_service::NewPalette, project_service};

pub const SEED_PROJECT_NAME: &str = "Super dope project";
pub const SEED_PALETTE_NAME: &str = "super dope palette";

pub fn test_palette(palette_name: &str, project_id: i32) -> NewPalette {
    NewPalette {
        palette_name: palette_name.to_string(),
        project_id,
        color_1: "#000000".to_string(),
        color_2: "#FFFFFF".to_string(),
        color_3: "#CCCCCC".to_string(),
        color_4: "#1F1F1F".to_string(),
        color_5: "#1E1E1E".to_string(),
    }
}

/// A fresh database with both tables and the fixture rows: project
/// `Super dope project` (id 1) owning palette `super dope palette`.
pub async fn seeded_db() -> DatabaseConnection {
    // Every connection to `sqlite::memory:` is its own database.
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(Project)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(Palette)))
        .await
        .unwrap();

    let project = project_service::insert(&db, SEED_PROJECT_NAME.to_string())
        .await
        .unwrap();
    palette_service::insert(
        &db,
        NewPalette {
            color_4: "#1f1f1f".to_string(),
            color_5: "#1d1d1d".to_string(),
            ..test_palette(SEED_PALETTE_NAME, project.id)
        },
    )
    .await
    .unwrap();

    db
}
