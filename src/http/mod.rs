//! Request and response descriptors exchanged with a demo service.

mod request;
mod response;

pub use request::{DemoRequest, Method};
pub use response::{
    iso8601, DemoResponse, GenericResponse, HealthResponse, Product, ProductCreatedResponse,
    ProductsResponse, StatusCode, User, UsersResponse,
};
