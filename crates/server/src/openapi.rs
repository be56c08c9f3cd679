use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub message: Option<String> }

#[derive(ToSchema)]
pub struct MovieDoc {
    pub id: u64,
    pub name: String,
    pub director: String,
    pub genres: Vec<String>,
    pub shop: u64,
    pub rent: bool,
}

#[derive(ToSchema)]
pub struct MovieCreateDoc {
    pub name: String,
    pub director: String,
    pub genres: Vec<String>,
    /// Integer, or text holding an integer.
    #[schema(example = "1")]
    pub shop: String,
}

#[derive(ToSchema)]
pub struct MovieUpdateDoc {
    pub name: String,
    pub director: String,
    pub genres: Vec<String>,
    pub rent: Option<bool>,
}

#[derive(ToSchema)]
pub struct MoveDoc { pub shop: u64 }

#[derive(ToSchema)]
pub struct ShopInputDoc { pub address: String, pub manager: String }

#[derive(ToSchema)]
pub struct ShopDoc {
    pub id: u64,
    pub address: String,
    pub manager: String,
    pub movies: Vec<MovieDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::movies::list,
        crate::routes::movies::get,
        crate::routes::movies::create,
        crate::routes::movies::update,
        crate::routes::movies::move_to_shop,
        crate::routes::movies::delete,
        crate::routes::shops::list,
        crate::routes::shops::get,
        crate::routes::shops::create,
        crate::routes::shops::update,
        crate::routes::shops::delete,
        crate::routes::shops::movies,
        crate::routes::shops::available_movies,
        crate::routes::search::movies,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            MovieDoc,
            MovieCreateDoc,
            MovieUpdateDoc,
            MoveDoc,
            ShopInputDoc,
            ShopDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "movies"),
        (name = "shops"),
        (name = "search")
    )
)]
pub struct ApiDoc;
