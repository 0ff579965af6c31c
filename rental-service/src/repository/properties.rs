use std::collections::HashMap;

use common::errors::AppResult;
use common::models::{NewProperty, PropertyFilter, PropertyItem};
use sqlx::{Any, AnyConnection, QueryBuilder};

/// Row from the `properties` table.
#[derive(sqlx::FromRow)]
struct PropertyRow {
    property_id: i64,
    property_name: String,
    address: String,
    city: String,
    postal_code: Option<String>,
    property_type: String,
    bedrooms: Option<i64>,
    bathrooms: Option<i64>,
    size_sqm: Option<f64>,
    monthly_rent: f64,
    is_furnished: i64,
    description: Option<String>,
    status: String,
}

impl PropertyRow {
    fn into_item(self, images: Vec<String>) -> PropertyItem {
        PropertyItem {
            property_id: self.property_id,
            property_name: self.property_name,
            address: self.address,
            city: self.city,
            postal_code: self.postal_code,
            property_type: self.property_type,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            size_sqm: self.size_sqm,
            monthly_rent: self.monthly_rent,
            is_furnished: self.is_furnished != 0,
            description: self.description,
            status: self.status,
            images,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ImageRow {
    property_id: i64,
    image_url: String,
}

/// Lists properties matching `filter`, each with its image URLs.
pub async fn list(conn: &mut AnyConnection, filter: &PropertyFilter) -> AppResult<Vec<PropertyItem>> {
    let mut query: QueryBuilder<Any> = QueryBuilder::new(
        "SELECT property_id, property_name, address, city, postal_code, property_type, \
         bedrooms, bathrooms, size_sqm, monthly_rent, is_furnished, description, status \
         FROM properties WHERE 1=1",
    );
    if let Some(city) = &filter.city {
        query.push(" AND city = ").push_bind(city.clone());
    }
    if let Some(property_type) = &filter.property_type {
        query.push(" AND property_type = ").push_bind(property_type.clone());
    }
    query.push(" ORDER BY property_id");

    let rows: Vec<PropertyRow> = query.build_query_as().fetch_all(&mut *conn).await?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = rows.iter().map(|row| row.property_id).collect();
    let mut images = images_for(conn, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let urls = images.remove(&row.property_id).unwrap_or_default();
            row.into_item(urls)
        })
        .collect())
}

/// IDs bound per image query, well under the bind limit of either backend.
const IMAGE_LOOKUP_BATCH: usize = 500;

async fn images_for(
    conn: &mut AnyConnection,
    property_ids: &[i64],
) -> AppResult<HashMap<i64, Vec<String>>> {
    let mut images: HashMap<i64, Vec<String>> = HashMap::new();
    for batch in property_ids.chunks(IMAGE_LOOKUP_BATCH) {
        let mut query: QueryBuilder<Any> = QueryBuilder::new(
            "SELECT property_id, image_url FROM property_images WHERE property_id IN (",
        );
        let mut ids = query.separated(", ");
        for id in batch {
            ids.push_bind(*id);
        }
        query.push(") ORDER BY image_id");

        let rows: Vec<ImageRow> = query.build_query_as().fetch_all(&mut *conn).await?;
        for row in rows {
            images.entry(row.property_id).or_default().push(row.image_url);
        }
    }
    Ok(images)
}

/// Inserts a property and returns its ID.
pub async fn create(conn: &mut AnyConnection, property: &NewProperty) -> AppResult<i64> {
    let result = sqlx::query(
        "INSERT INTO properties (property_name, address, city, postal_code, property_type, \
         bedrooms, bathrooms, size_sqm, monthly_rent, is_furnished, description, status) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&property.property_name)
    .bind(&property.address)
    .bind(&property.city)
    .bind(&property.postal_code)
    .bind(&property.property_type)
    .bind(property.bedrooms)
    .bind(property.bathrooms)
    .bind(property.size_sqm)
    .bind(property.monthly_rent)
    .bind(i64::from(property.is_furnished))
    .bind(&property.description)
    .bind(&property.status)
    .execute(&mut *conn)
    .await?;

    super::inserted_id(conn, &result, "properties").await
}
