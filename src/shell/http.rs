use axum::routing::{delete, get, patch, post};
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::modules::approvals::use_cases::bulk_approve_timesheets::inbound::http as bulk_approve_http;
use crate::modules::approvals::use_cases::decide_leave_request::inbound::http as decide_leave_http;
use crate::modules::approvals::use_cases::decide_swap_request::inbound::http as decide_swap_http;
use crate::modules::approvals::use_cases::decide_timesheet::inbound::http as decide_timesheet_http;
use crate::modules::approvals::use_cases::submit_leave_request::inbound::http as submit_leave_http;
use crate::modules::approvals::use_cases::submit_swap_request::inbound::http as submit_swap_http;
use crate::modules::dashboard::feed;
use crate::modules::discrepancies::use_cases::daily_report::inbound::http as daily_report_http;
use crate::modules::discrepancies::use_cases::entry_discrepancies::inbound::http as entry_discrepancies_http;
use crate::modules::scheduling::use_cases::assign_shift::inbound::http as assign_http;
use crate::modules::scheduling::use_cases::delete_assignment::inbound::http as delete_assignment_http;
use crate::modules::scheduling::use_cases::manage_rotas::inbound::http as rotas_http;
use crate::modules::scheduling::use_cases::manage_templates::inbound::http as templates_http;
use crate::modules::scheduling::use_cases::publish_shifts::inbound::http as publish_http;
use crate::modules::scheduling::use_cases::update_assignment::inbound::http as update_assignment_http;
use crate::modules::scheduling::use_cases::week_view::inbound::http as week_view_http;
use crate::modules::time_accounting::use_cases::clock_in::inbound::http as clock_in_http;
use crate::modules::time_accounting::use_cases::clock_out::inbound::http as clock_out_http;
use crate::modules::time_accounting::use_cases::edit_time_entry::inbound::http as edit_entry_http;
use crate::modules::time_accounting::use_cases::track_breaks::inbound::http as breaks_http;
use crate::shell::graphql::{build_schema, graphiql, graphql};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    let schema = build_schema(state.clone());

    let scheduling = Router::new()
        .route(
            "/assign",
            post(assign_http::handle)
                .put(update_assignment_http::handle)
                .delete(delete_assignment_http::handle),
        )
        .route("/publish", post(publish_http::handle))
        .route("/week/{date}", get(week_view_http::handle))
        .route("/templates", get(templates_http::list).post(templates_http::create))
        .route("/templates/{id}", delete(templates_http::deactivate))
        .route("/rotas", post(rotas_http::create))
        .route("/rotas/{id}/publish", post(rotas_http::publish))
        .route("/rotas/{id}/revert", post(rotas_http::revert))
        .route("/discrepancies", get(daily_report_http::handle));

    let time = Router::new()
        .route("/clock-in", post(clock_in_http::handle))
        .route("/clock-out", post(clock_out_http::handle))
        .route("/break-start", post(breaks_http::start))
        .route("/break-end", post(breaks_http::end))
        .route("/entries/{id}", patch(edit_entry_http::handle))
        .route(
            "/entries/{id}/discrepancies",
            get(entry_discrepancies_http::handle),
        );

    let admin = Router::new()
        .route("/shift-approvals/{id}", patch(decide_timesheet_http::handle))
        .route("/leave-requests/{id}", patch(decide_leave_http::handle))
        .route("/swap-requests/{id}", patch(decide_swap_http::handle))
        .route("/timesheet/bulk-approve", post(bulk_approve_http::handle));

    Router::new()
        .nest("/scheduling", scheduling)
        .nest("/time", time)
        .nest("/admin", admin)
        .route(
            "/manager/approvals/leave-request/{id}",
            patch(decide_leave_http::handle),
        )
        .route("/leave-requests", post(submit_leave_http::handle))
        .route("/swap-requests", post(submit_swap_http::handle))
        .route("/dashboard/stream", get(feed::stream))
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
