use crate::infrastructure::http::client::ApiClient;

#[derive(Clone)]
pub struct HttpAuthRepo {
    pub client: ApiClient,
}

#[derive(Clone)]
pub struct HttpCommentRepo {
    pub client: ApiClient,
}

#[derive(Clone)]
pub struct HttpInspectionRepo {
    pub client: ApiClient,
    pub page_size: u32,
}

#[derive(Clone)]
pub struct HttpTransformerRepo {
    pub client: ApiClient,
    pub page_size: u32,
}

#[derive(Clone)]
pub struct HttpThermalImageRepo {
    pub client: ApiClient,
    pub page_size: u32,
}

#[derive(Clone)]
pub struct HttpMaintenanceRecordRepo {
    pub client: ApiClient,
    pub page_size: u32,
}
