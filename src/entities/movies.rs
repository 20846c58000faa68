use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    /// Running time in minutes
    pub duration: i32,
    pub language: String,
    pub subtitles: Option<String>,
    pub director: String,
    /// JSON array of actor names, billing order preserved
    pub actors: String,
    pub min_age: Option<i32>,
    pub poster: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::screenings::Entity")]
    Screenings,
}

impl Related<super::screenings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Screenings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
