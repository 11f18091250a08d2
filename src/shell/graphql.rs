use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptyMutation, EmptySubscription, MergedObject, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Extension;
use axum::response::Html;

use crate::modules::discrepancies::use_cases::entry_discrepancies::inbound::graphql::DiscrepancyQueryRoot;
use crate::modules::scheduling::use_cases::week_view::inbound::graphql::WeekViewQueryRoot;
use crate::shell::identity::Caller;
use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(WeekViewQueryRoot, DiscrepancyQueryRoot);

pub type AppSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), EmptyMutation, EmptySubscription)
        .data(state)
        .finish()
}

/// Executes a query on behalf of the identified caller.
pub async fn graphql(
    Extension(schema): Extension<AppSchema>,
    Caller(context): Caller,
    request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(request.into_inner().data(context)).await.into()
}

pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/gql").finish())
}
