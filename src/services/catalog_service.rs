use crate::config::StorefrontConfig;
use crate::entities::{
    category_entity as categories, product_entity as products, product_image_entity as images,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{cents_to_major, like_contains_pattern, truncate_description};
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

const RELATED_PRODUCTS_LIMIT: u64 = 4;

/// `LOWER(col) LIKE '%term%'`, term 需已转小写
fn icontains<T: IntoColumnRef>(col: T, term: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col)))
        .like(LikeExpr::new(like_contains_pattern(term)).escape('\\'))
}

fn available_products() -> Select<products::Entity> {
    products::Entity::find()
        .filter(products::Column::IsAvailable.eq(true))
        .order_by_asc(products::Column::Id)
}

#[derive(Clone)]
pub struct CatalogService {
    pool: DatabaseConnection,
    storefront: StorefrontConfig,
}

impl CatalogService {
    pub fn new(pool: DatabaseConnection, storefront: StorefrontConfig) -> Self {
        Self { pool, storefront }
    }

    pub fn storefront(&self) -> &StorefrontConfig {
        &self.storefront
    }

    /// 首页: 全部分类 + 前 N 个在售商品
    pub async fn home(&self) -> AppResult<HomeResponse> {
        let categories = self.list_categories().await?;
        let featured = available_products()
            .limit(self.storefront.featured_limit)
            .all(&self.pool)
            .await?;

        Ok(HomeResponse {
            categories,
            featured_products: self.with_images(featured).await?,
        })
    }

    pub async fn list_categories(&self) -> AppResult<Vec<CategoryResponse>> {
        let list = categories::Entity::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 商品列表: 按分类过滤, 按名称/描述模糊搜索 (不区分大小写)
    pub async fn list_products(
        &self,
        category_id: Option<i32>,
        search: Option<&str>,
    ) -> AppResult<ProductListResponse> {
        let mut query = available_products();

        if let Some(category_id) = category_id {
            query = query.filter(products::Column::CategoryId.eq(category_id));
        }

        if let Some(search) = search.filter(|s| !s.is_empty()) {
            let term = search.to_lowercase();
            query = query.filter(
                Condition::any()
                    .add(icontains(
                        (products::Entity, products::Column::Name),
                        &term,
                    ))
                    .add(icontains(
                        (products::Entity, products::Column::Description),
                        &term,
                    )),
            );
        }

        let found = query.all(&self.pool).await?;

        Ok(ProductListResponse {
            products: self.with_images(found).await?,
            categories: self.list_categories().await?,
        })
    }

    /// 商品详情 + 同分类的相关商品 (最多 4 个, 不含自身)
    pub async fn product_detail(&self, slug: &str) -> AppResult<ProductDetailResponse> {
        let product = products::Entity::find()
            .filter(products::Column::Slug.eq(slug))
            .filter(products::Column::IsAvailable.eq(true))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        let category = product
            .find_related(categories::Entity)
            .one(&self.pool)
            .await?;

        let product_images = images::Entity::find()
            .filter(images::Column::ProductId.eq(product.id))
            .order_by_asc(images::Column::Id)
            .all(&self.pool)
            .await?;

        let related = available_products()
            .filter(products::Column::CategoryId.eq(product.category_id))
            .filter(products::Column::Id.ne(product.id))
            .limit(RELATED_PRODUCTS_LIMIT)
            .all(&self.pool)
            .await?;

        let image_url = self.image_url(&product_images);
        let images = product_images
            .into_iter()
            .map(|i| ProductImageResponse {
                id: i.id,
                url: crate::utils::media_path(&self.storefront.media_url, &i.image),
                is_primary: i.is_primary,
            })
            .collect();

        Ok(ProductDetailResponse {
            product: ProductResponse::new(product, image_url),
            category: category.map(Into::into),
            images,
            related_products: self.with_images(related).await?,
        })
    }

    pub async fn chatbot_categories(&self) -> AppResult<ChatbotCategoriesResponse> {
        let list = categories::Entity::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(ChatbotCategoriesResponse {
            categories: list
                .into_iter()
                .map(|c| ChatbotCategory {
                    id: c.id,
                    name: c.name,
                    description: c.description,
                })
                .collect(),
        })
    }

    /// 聊天机器人商品查询
    ///
    /// 指定 category_id 时只按分类过滤 (忽略 query);
    /// 否则 query 非空时匹配商品名称、描述或分类名称。不限制条数。
    pub async fn chatbot_products(
        &self,
        category_id: Option<i32>,
        query: &str,
    ) -> AppResult<ChatbotProductsResponse> {
        let mut select = available_products();

        if let Some(category_id) = category_id {
            select = select.filter(products::Column::CategoryId.eq(category_id));
        } else if !query.is_empty() {
            let term = query.to_lowercase();
            select = select.inner_join(categories::Entity).filter(
                Condition::any()
                    .add(icontains(
                        (products::Entity, products::Column::Name),
                        &term,
                    ))
                    .add(icontains(
                        (products::Entity, products::Column::Description),
                        &term,
                    ))
                    .add(icontains(
                        (categories::Entity, categories::Column::Name),
                        &term,
                    )),
            );
        }

        let found = select.all(&self.pool).await?;
        if found.is_empty() {
            return Ok(ChatbotProductsResponse { products: vec![] });
        }

        let product_categories = found.load_one(categories::Entity, &self.pool).await?;
        let product_images = found.load_many(images::Entity, &self.pool).await?;

        let products = found
            .into_iter()
            .zip(product_categories)
            .zip(product_images)
            .map(|((p, category), imgs)| ChatbotProduct {
                id: p.id,
                name: p.name,
                price: cents_to_major(p.price),
                description: truncate_description(&p.description, CHATBOT_DESCRIPTION_LIMIT),
                category: category.map(|c| c.name).unwrap_or_default(),
                slug: p.slug,
                image_url: self.image_url(&imgs),
            })
            .collect();

        Ok(ChatbotProductsResponse { products })
    }

    fn image_url(&self, product_images: &[images::Model]) -> String {
        resolve_image_url(
            product_images,
            &self.storefront.media_url,
            &self.storefront.placeholder_image,
        )
    }

    async fn with_images(&self, list: Vec<products::Model>) -> AppResult<Vec<ProductResponse>> {
        if list.is_empty() {
            return Ok(vec![]);
        }

        let product_images = list.load_many(images::Entity, &self.pool).await?;

        Ok(list
            .into_iter()
            .zip(product_images)
            .map(|(p, imgs)| {
                let url = self.image_url(&imgs);
                ProductResponse::new(p, url)
            })
            .collect())
    }
}
