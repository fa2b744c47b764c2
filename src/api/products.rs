//! Product catalog operations

use reqwest::Method;
use serde::Deserialize;

use super::push_param;
use crate::error::Error;
use crate::model::Record;
use crate::response::ApiResponse;
use crate::StorefrontClient;

/// Handle for product catalog operations.
///
/// Obtained through [`StorefrontClient::products`].
pub struct ProductsApi<'a> {
    pub(crate) client: &'a StorefrontClient,
}

impl<'a> ProductsApi<'a> {
    /// Lists products with server-side filtering and pagination.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let page = client.products()
    ///     .list(ProductQuery::new().category("electronics").in_stock(true))
    ///     .await?
    ///     .into_inner();
    ///
    /// println!("{} of {} products", page.products.len(), page.total);
    /// ```
    pub async fn list(&self, query: ProductQuery) -> Result<ApiResponse<ProductPage>, Error> {
        let path = format!("/products{}", query.to_query_string());
        self.client.get_json(&path).await
    }

    /// Returns an async iterator over all result pages for a query.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut pages = client.products().pages(ProductQuery::new().limit(100));
    /// while let Some(page) = pages.next().await {
    ///     for product in &page?.products {
    ///         println!("{}", product.text("name"));
    ///     }
    /// }
    /// ```
    pub fn pages(&self, query: ProductQuery) -> ProductPages<'a> {
        ProductPages::new(self.client, query)
    }

    /// Gets a single product by id.
    pub async fn get(&self, product_id: i64) -> Result<ApiResponse<Record>, Error> {
        self.client.get_json(&format!("/products/{product_id}")).await
    }

    /// Creates a product (admin only). Returns the created record.
    pub async fn create(&self, product: Record) -> Result<Record, Error> {
        let body = serde_json::to_string(&product)?;
        self.client
            .send_json(Method::POST, "/products", Some(body))
            .await
    }

    /// Updates a product (admin only). Returns the updated record.
    pub async fn update(&self, product_id: i64, changes: Record) -> Result<Record, Error> {
        let body = serde_json::to_string(&changes)?;
        self.client
            .send_json(Method::PUT, &format!("/products/{product_id}"), Some(body))
            .await
    }

    /// Deletes a product (admin only).
    ///
    /// The service soft-deletes: the product is deactivated and drops out
    /// of listings.
    pub async fn delete(&self, product_id: i64) -> Result<(), Error> {
        self.client
            .send_and_drop(Method::DELETE, &format!("/products/{product_id}"), None)
            .await
    }
}

/// Server-side filter and pagination parameters for product listings.
///
/// All parameters are optional; the service defaults to the first 20
/// products. `skip`/`limit` paginate, the rest narrow the result.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    skip: Option<usize>,
    limit: Option<usize>,
    category: Option<String>,
    brand: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    search: Option<String>,
    featured: Option<bool>,
    on_sale: Option<bool>,
    in_stock: Option<bool>,
}

impl ProductQuery {
    /// Creates an empty query (service defaults apply).
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of products to skip.
    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Page size (the service caps this at 100).
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Filters to one category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filters to one brand.
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Lower price bound, inclusive.
    pub fn min_price(mut self, price: f64) -> Self {
        self.min_price = Some(price);
        self
    }

    /// Upper price bound, inclusive.
    pub fn max_price(mut self, price: f64) -> Self {
        self.max_price = Some(price);
        self
    }

    /// Full-text search over name, description and brand.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Only featured (or only non-featured) products.
    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    /// Only on-sale (or only full-price) products.
    pub fn on_sale(mut self, on_sale: bool) -> Self {
        self.on_sale = Some(on_sale);
        self
    }

    /// Only in-stock (or only out-of-stock) products.
    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    /// Renders the query string, starting with `?` when non-empty.
    pub(crate) fn to_query_string(&self) -> String {
        let mut query = String::new();
        if let Some(skip) = self.skip {
            push_param(&mut query, "skip", &skip.to_string());
        }
        if let Some(limit) = self.limit {
            push_param(&mut query, "limit", &limit.to_string());
        }
        if let Some(ref category) = self.category {
            push_param(&mut query, "category", category);
        }
        if let Some(ref brand) = self.brand {
            push_param(&mut query, "brand", brand);
        }
        if let Some(min_price) = self.min_price {
            push_param(&mut query, "min_price", &min_price.to_string());
        }
        if let Some(max_price) = self.max_price {
            push_param(&mut query, "max_price", &max_price.to_string());
        }
        if let Some(ref search) = self.search {
            push_param(&mut query, "search", search);
        }
        if let Some(featured) = self.featured {
            push_param(&mut query, "featured", &featured.to_string());
        }
        if let Some(on_sale) = self.on_sale {
            push_param(&mut query, "on_sale", &on_sale.to_string());
        }
        if let Some(in_stock) = self.in_stock {
            push_param(&mut query, "in_stock", &in_stock.to_string());
        }
        query
    }

    fn skip_value(&self) -> usize {
        self.skip.unwrap_or(0)
    }
}

/// One page of a product listing.
///
/// Deserialization also accepts a bare JSON array of products (some
/// deployments answer without the page envelope); in that case the page
/// counters are synthesized from the array length.
#[derive(Debug, Clone)]
pub struct ProductPage {
    /// Products on this page.
    pub products: Vec<Record>,
    /// Total matching products across all pages.
    pub total: usize,
    /// 1-based page number.
    pub page: usize,
    /// Page size used by the service.
    pub per_page: usize,
    /// Total number of pages.
    pub total_pages: usize,
}

impl ProductPage {
    /// Returns `true` if a further page exists after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

impl<'de> Deserialize<'de> for ProductPage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageOrList {
            Page {
                products: Vec<Record>,
                total: usize,
                page: usize,
                per_page: usize,
                total_pages: usize,
            },
            List(Vec<Record>),
        }

        Ok(match PageOrList::deserialize(deserializer)? {
            PageOrList::Page {
                products,
                total,
                page,
                per_page,
                total_pages,
            } => ProductPage {
                products,
                total,
                page,
                per_page,
                total_pages,
            },
            PageOrList::List(products) => {
                let total = products.len();
                ProductPage {
                    products,
                    total,
                    page: 1,
                    per_page: total.max(1),
                    total_pages: 1,
                }
            }
        })
    }
}

/// Async iterator that yields pages of product results.
///
/// Steps `skip` forward by the service-reported page size until the
/// listing is exhausted.
///
/// # Example
///
/// ```ignore
/// let mut pages = client.products().pages(ProductQuery::new());
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     println!("page {} of {}", page.page, page.total_pages);
/// }
/// ```
pub struct ProductPages<'a> {
    client: &'a StorefrontClient,
    query: ProductQuery,
    next_skip: usize,
    done: bool,
}

impl<'a> ProductPages<'a> {
    pub(crate) fn new(client: &'a StorefrontClient, query: ProductQuery) -> Self {
        let next_skip = query.skip_value();
        Self {
            client,
            query,
            next_skip,
            done: false,
        }
    }

    /// Fetches the next page of results.
    ///
    /// Returns `None` when all pages have been consumed.
    pub async fn next(&mut self) -> Option<Result<ProductPage, Error>> {
        if self.done {
            return None;
        }

        let query = self.query.clone().skip(self.next_skip);
        let path = format!("/products{}", query.to_query_string());

        let page: ProductPage = match self.client.get_json(&path).await {
            Ok(response) => response.into_inner(),
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        self.next_skip += page.products.len();
        if page.products.is_empty() || self.next_skip >= page.total {
            self.done = true;
        }

        Some(Ok(page))
    }
}
