//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod achievement;
pub mod article;
pub mod banner;
pub mod category;
pub mod employee;
pub mod extracurricular;
pub mod facility;
pub mod gallery;
pub mod gallery_image;
pub mod major;
pub mod school_profile;
pub mod setting;
pub mod user;

// Re-export specific types to avoid conflicts
pub use achievement::{Column as AchievementColumn, Entity as Achievement, Model as AchievementModel};
pub use article::{Column as ArticleColumn, Entity as Article, Model as ArticleModel};
pub use banner::{Column as BannerColumn, Entity as Banner, Model as BannerModel};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use extracurricular::{
    Column as ExtracurricularColumn, Entity as Extracurricular, Model as ExtracurricularModel,
};
pub use facility::{Column as FacilityColumn, Entity as Facility, Model as FacilityModel};
pub use gallery::{Column as GalleryColumn, Entity as Gallery, Model as GalleryModel};
pub use gallery_image::{
    Column as GalleryImageColumn, Entity as GalleryImage, Model as GalleryImageModel,
};
pub use major::{Column as MajorColumn, Entity as Major, Model as MajorModel};
pub use school_profile::{
    Column as SchoolProfileColumn, Entity as SchoolProfile, Model as SchoolProfileModel,
};
pub use setting::{Column as SettingColumn, Entity as Setting, Model as SettingModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
