use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "peliculas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub titulo: String,

    pub titulo_original: Option<String>,

    pub director: String,

    pub anio: i32,

    pub sinopsis: String,

    pub imagen_url: String,

    /// Runtime in minutes.
    pub duracion: i32,

    pub pais: String,

    pub rating_promedio: f64,

    pub trailer_url: String,

    /// Release date, `YYYY-MM-DD`.
    pub fecha_estreno: String,

    pub fecha_creacion: String,

    pub fecha_modificacion: String,

    /// Owning account. Not enforced as an ownership check on mutation.
    pub usuario_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
