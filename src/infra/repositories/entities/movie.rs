//! Movie database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Movie;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub synopsis: Option<String>,
    pub score: f64,
    pub count: i32,
    pub image: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::score::Entity")]
    Score,
}

impl Related<super::score::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Score.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Movie {
    fn from(model: Model) -> Self {
        Movie {
            id: model.id,
            title: model.title,
            synopsis: model.synopsis,
            score: model.score,
            count: model.count,
            image: model.image,
        }
    }
}
