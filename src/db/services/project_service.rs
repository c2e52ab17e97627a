use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::db::entities::{prelude::Project, project};

/// All projects in insertion order.
pub async fn find_all(db: &DbConn) -> Result<Vec<project::Model>, DbErr> {
    Project::find()
        .order_by_asc(project::Column::Id)
        .all(db)
        .await
}

pub async fn find_by_name(db: &DbConn, name: &str) -> Result<Option<project::Model>, DbErr> {
    Project::find()
        .filter(project::Column::Name.eq(name))
        .one(db)
        .await
}

/// Inserts a project and returns the stored row.
pub async fn insert(db: &DbConn, name: String) -> Result<project::Model, DbErr> {
    let now = Utc::now();
    let new_project = project::ActiveModel {
        id: NotSet,
        name: Set(name),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_project.insert(db).await
}

/// Renames the project called `name`. Returns the number of rows touched.
pub async fn update_by_name(db: &DbConn, name: &str, new_name: String) -> Result<u64, DbErr> {
    let changes = project::ActiveModel {
        name: Set(new_name),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = Project::update_many()
        .set(changes)
        .filter(project::Column::Name.eq(name))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_by_name(db: &DbConn, name: &str) -> Result<u64, DbErr> {
    let result = Project::delete_many()
        .filter(project::Column::Name.eq(name))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
