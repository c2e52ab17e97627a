//! SeaORM entities for the `projects` and `palettes` tables.

pub mod palette;
pub mod project;

pub mod prelude {
    pub use super::project::ActiveModel as ProjectActiveModel;
    pub use super::project::Column as ProjectColumn;
    pub use super::project::Entity as Project;
    pub use super::project::Model as ProjectModel;

    pub use super::palette::ActiveModel as PaletteActiveModel;
    pub use super::palette::Column as PaletteColumn;
    pub use super::palette::Entity as Palette;
    pub use super::palette::Model as PaletteModel;
}
