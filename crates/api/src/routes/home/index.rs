use axum::response::Html;

const ROUTES: &str = "Climate Data API Endpoints:<br/>\
/api/v1.0/rainfall: Last 12 months of rainfall data<br/>\
/api/v1.0/weather_stations: Weather station list<br/>\
/api/v1.0/temperature_observations: Temperature data for the top station in the last year<br/>\
/api/v1.0/&lt;start&gt;: Temperature stats from a start date (YYYY-MM-DD)<br/>\
/api/v1.0/&lt;start&gt;/&lt;end&gt;: Temperature stats between start and end dates (YYYY-MM-DD)<br/>\
/docs: OpenAPI documentation<br/>";

/// Lists the available API routes (GET /)
pub async fn index_handler() -> Html<&'static str> {
    Html(ROUTES)
}
