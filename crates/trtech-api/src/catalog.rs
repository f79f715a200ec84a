//! Products and services endpoints.

use crate::{ApiClient, ApiError};
use reqwest::Method;
use trtech_commerce::catalog::{Product, ProductFilter, Service};
use trtech_commerce::ids::{ProductId, ServiceId};

impl ApiClient {
    /// `GET /products`, with category/condition passed to the backend.
    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, ApiError> {
        let products: Vec<Product> = self.get("/products", &filter.query_pairs()).await?;
        if filter.search.is_some() {
            return Ok(filter.apply(&products).into_iter().cloned().collect());
        }
        Ok(products)
    }

    /// `GET /products/:id`.
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.get(&format!("/products/{id}"), &[]).await
    }

    /// `POST /products`.
    pub async fn create_product(&self, product: &Product) -> Result<Product, ApiError> {
        self.send(Method::POST, "/products", product).await
    }

    /// `PUT /products/:id`.
    pub async fn update_product(&self, product: &Product) -> Result<Product, ApiError> {
        self.send(Method::PUT, &format!("/products/{}", product.id), product)
            .await
    }

    /// `DELETE /products/:id`.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.delete(&format!("/products/{id}")).await
    }

    /// `GET /services`.
    pub async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        self.get("/services", &[]).await
    }

    /// `GET /services/:id`.
    pub async fn get_service(&self, id: &ServiceId) -> Result<Service, ApiError> {
        self.get(&format!("/services/{id}"), &[]).await
    }

    /// `POST /services`.
    pub async fn create_service(&self, service: &Service) -> Result<Service, ApiError> {
        self.send(Method::POST, "/services", service).await
    }

    /// `PUT /services/:id`.
    pub async fn update_service(&self, service: &Service) -> Result<Service, ApiError> {
        self.send(Method::PUT, &format!("/services/{}", service.id), service)
            .await
    }

    /// `DELETE /services/:id`.
    pub async fn delete_service(&self, id: &ServiceId) -> Result<(), ApiError> {
        self.delete(&format!("/services/{id}")).await
    }
}
