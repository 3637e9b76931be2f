use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::movies;

/// Column values for a new row. Timestamps are assigned on insert.
#[derive(Debug, Clone)]
pub struct MovieInsert {
    pub titulo: String,
    pub titulo_original: Option<String>,
    pub director: String,
    pub anio: i32,
    pub sinopsis: String,
    pub imagen_url: String,
    pub duracion: i32,
    pub pais: String,
    pub rating_promedio: f64,
    pub trailer_url: String,
    pub fecha_estreno: String,
    pub usuario_id: i32,
}

/// Partial update over the whitelisted mutable columns.
#[derive(Debug, Clone, Default)]
pub struct MovieChanges {
    pub titulo: Option<String>,
    pub titulo_original: Option<String>,
    pub director: Option<String>,
    pub anio: Option<i32>,
    pub sinopsis: Option<String>,
    pub imagen_url: Option<String>,
    pub duracion: Option<i32>,
    pub pais: Option<String>,
    pub rating_promedio: Option<f64>,
    pub trailer_url: Option<String>,
    pub fecha_estreno: Option<String>,
}

impl MovieChanges {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.titulo.is_none()
            && self.titulo_original.is_none()
            && self.director.is_none()
            && self.anio.is_none()
            && self.sinopsis.is_none()
            && self.imagen_url.is_none()
            && self.duracion.is_none()
            && self.pais.is_none()
            && self.rating_promedio.is_none()
            && self.trailer_url.is_none()
            && self.fecha_estreno.is_none()
    }
}

/// Conjunctive search criteria. String fields match by substring,
/// `min_rating` by threshold, the rest by equality.
#[derive(Debug, Clone, Default)]
pub struct MovieQuery {
    pub id: Option<i32>,
    pub titulo: Option<String>,
    pub titulo_original: Option<String>,
    pub director: Option<String>,
    pub anio: Option<i32>,
    pub sinopsis: Option<String>,
    pub pais: Option<String>,
    pub duracion: Option<i32>,
    pub min_rating: Option<f64>,
    pub fecha_estreno: Option<String>,
    pub usuario_id: Option<i32>,
}

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, movie: MovieInsert) -> Result<movies::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = movies::ActiveModel {
            titulo: Set(movie.titulo),
            titulo_original: Set(movie.titulo_original),
            director: Set(movie.director),
            anio: Set(movie.anio),
            sinopsis: Set(movie.sinopsis),
            imagen_url: Set(movie.imagen_url),
            duracion: Set(movie.duracion),
            pais: Set(movie.pais),
            rating_promedio: Set(movie.rating_promedio),
            trailer_url: Set(movie.trailer_url),
            fecha_estreno: Set(movie.fecha_estreno),
            fecha_creacion: Set(now.clone()),
            fecha_modificacion: Set(now),
            usuario_id: Set(movie.usuario_id),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert movie")?;

        Ok(model)
    }

    pub async fn get(&self, id: i32) -> Result<Option<movies::Model>> {
        let movie = movies::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query movie by id")?;

        Ok(movie)
    }

    pub async fn list(&self, limit: u64, page: u64) -> Result<(Vec<movies::Model>, u64)> {
        let paginator = movies::Entity::find()
            .order_by_desc(movies::Column::FechaCreacion)
            .order_by_desc(movies::Column::Id)
            .paginate(&self.conn, limit);

        let total = paginator
            .num_items()
            .await
            .context("Failed to count movies")?;

        let rows = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .context("Failed to list movies")?;

        Ok((rows, total))
    }

    pub async fn search(&self, query: &MovieQuery) -> Result<Vec<movies::Model>> {
        let condition = Condition::all()
            .add_option(query.id.map(|v| movies::Column::Id.eq(v)))
            .add_option(
                query
                    .titulo
                    .as_deref()
                    .map(|v| movies::Column::Titulo.contains(v)),
            )
            .add_option(
                query
                    .titulo_original
                    .as_deref()
                    .map(|v| movies::Column::TituloOriginal.contains(v)),
            )
            .add_option(
                query
                    .director
                    .as_deref()
                    .map(|v| movies::Column::Director.contains(v)),
            )
            .add_option(query.anio.map(|v| movies::Column::Anio.eq(v)))
            .add_option(
                query
                    .sinopsis
                    .as_deref()
                    .map(|v| movies::Column::Sinopsis.contains(v)),
            )
            .add_option(
                query
                    .pais
                    .as_deref()
                    .map(|v| movies::Column::Pais.contains(v)),
            )
            .add_option(query.duracion.map(|v| movies::Column::Duracion.eq(v)))
            .add_option(
                query
                    .min_rating
                    .map(|v| movies::Column::RatingPromedio.gte(v)),
            )
            .add_option(
                query
                    .fecha_estreno
                    .as_deref()
                    .map(|v| movies::Column::FechaEstreno.eq(v)),
            )
            .add_option(query.usuario_id.map(|v| movies::Column::UsuarioId.eq(v)));

        let rows = movies::Entity::find()
            .filter(condition)
            .order_by_desc(movies::Column::FechaCreacion)
            .order_by_desc(movies::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to search movies")?;

        Ok(rows)
    }

    pub async fn update(&self, id: i32, changes: MovieChanges) -> Result<Option<movies::Model>> {
        let Some(movie) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: movies::ActiveModel = movie.into();
        if let Some(titulo) = changes.titulo {
            active.titulo = Set(titulo);
        }
        if let Some(titulo_original) = changes.titulo_original {
            active.titulo_original = Set(Some(titulo_original));
        }
        if let Some(director) = changes.director {
            active.director = Set(director);
        }
        if let Some(anio) = changes.anio {
            active.anio = Set(anio);
        }
        if let Some(sinopsis) = changes.sinopsis {
            active.sinopsis = Set(sinopsis);
        }
        if let Some(imagen_url) = changes.imagen_url {
            active.imagen_url = Set(imagen_url);
        }
        if let Some(duracion) = changes.duracion {
            active.duracion = Set(duracion);
        }
        if let Some(pais) = changes.pais {
            active.pais = Set(pais);
        }
        if let Some(rating_promedio) = changes.rating_promedio {
            active.rating_promedio = Set(rating_promedio);
        }
        if let Some(trailer_url) = changes.trailer_url {
            active.trailer_url = Set(trailer_url);
        }
        if let Some(fecha_estreno) = changes.fecha_estreno {
            active.fecha_estreno = Set(fecha_estreno);
        }
        active.fecha_modificacion = Set(chrono::Utc::now().to_rfc3339());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update movie")?;

        Ok(Some(updated))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = movies::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete movie")?;

        Ok(result.rows_affected > 0)
    }
}
