pub mod app;
pub mod dice;
pub mod settings;

pub mod middleware {
    pub mod bind;
    pub mod cors;
}

pub mod models {
    pub mod modeling_models;
}

pub mod routes {
    pub mod modeling_routes;
}

pub mod services {
    pub mod distributions;
    pub mod histogram;
    pub mod sampler;
    pub mod modeling_service;
}
