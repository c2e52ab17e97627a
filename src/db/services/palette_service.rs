use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DbConn, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::db::entities::{palette, prelude::Palette};

/// A palette ready to be inserted: every column the caller must supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPalette {
    pub palette_name: String,
    pub project_id: i32,
    pub color_1: String,
    pub color_2: String,
    pub color_3: String,
    pub color_4: String,
    pub color_5: String,
}

/// A partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteChanges {
    pub palette_name: Option<String>,
    pub project_id: Option<i32>,
    pub color_1: Option<String>,
    pub color_2: Option<String>,
    pub color_3: Option<String>,
    pub color_4: Option<String>,
    pub color_5: Option<String>,
}

impl PaletteChanges {
    pub fn is_empty(&self) -> bool {
        self == &PaletteChanges::default()
    }

    fn into_active_model(self) -> palette::ActiveModel {
        palette::ActiveModel {
            id: NotSet,
            palette_name: set_if_some(self.palette_name),
            project_id: set_if_some(self.project_id),
            color_1: set_if_some(self.color_1),
            color_2: set_if_some(self.color_2),
            color_3: set_if_some(self.color_3),
            color_4: set_if_some(self.color_4),
            color_5: set_if_some(self.color_5),
            created_at: NotSet,
            updated_at: Set(Utc::now()),
        }
    }
}

fn set_if_some<T>(value: Option<T>) -> ActiveValue<T>
where
    T: Into<sea_orm::Value>,
{
    match value {
        Some(v) => Set(v),
        None => NotSet,
    }
}

pub async fn find_all(db: &DbConn) -> Result<Vec<palette::Model>, DbErr> {
    Palette::find()
        .order_by_asc(palette::Column::Id)
        .all(db)
        .await
}

pub async fn find_by_name(db: &DbConn, palette_name: &str) -> Result<Option<palette::Model>, DbErr> {
    Palette::find()
        .filter(palette::Column::PaletteName.eq(palette_name))
        .one(db)
        .await
}

/// Inserts a palette and returns the stored row. The owning project must
/// already exist; the store rejects dangling `project_id`s.
pub async fn insert(db: &DbConn, new_palette: NewPalette) -> Result<palette::Model, DbErr> {
    let now = Utc::now();
    let active = palette::ActiveModel {
        id: NotSet,
        palette_name: Set(new_palette.palette_name),
        project_id: Set(new_palette.project_id),
        color_1: Set(new_palette.color_1),
        color_2: Set(new_palette.color_2),
        color_3: Set(new_palette.color_3),
        color_4: Set(new_palette.color_4),
        color_5: Set(new_palette.color_5),
        created_at: Set(now),
        updated_at: Set(now),
    };

    active.insert(db).await
}

/// Applies `changes` to the palette called `palette_name`. Returns the number
/// of rows touched.
pub async fn update_by_name(
    db: &DbConn,
    palette_name: &str,
    changes: PaletteChanges,
) -> Result<u64, DbErr> {
    let result = Palette::update_many()
        .set(changes.into_active_model())
        .filter(palette::Column::PaletteName.eq(palette_name))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_by_name(db: &DbConn, palette_name: &str) -> Result<u64, DbErr> {
    let result = Palette::delete_many()
        .filter(palette::Column::PaletteName.eq(palette_name))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
