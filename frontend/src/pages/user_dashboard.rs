use crate::{
    api::{use_api, ApiError, ReservationRecord, UserAnalytics, UserLot},
    components::{
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{LoadingSpinner, PageFrame, SuccessMessage},
    },
    router::Page,
};
use chrono::NaiveDateTime;
use leptos::*;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParkingAction {
    Reserve(i64),
    Release(i64),
}

fn format_timestamp(ts: Option<NaiveDateTime>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".into())
}

fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Hours and spend per month, oldest first. A month missing from one series
/// shows up with `None` on that side.
fn monthly_rows(analytics: &UserAnalytics) -> Vec<(String, Option<f64>, Option<f64>)> {
    let mut months: BTreeMap<&str, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for entry in &analytics.parking_stats {
        months.entry(entry.month.as_str()).or_default().0 = Some(entry.hours);
    }
    for entry in &analytics.revenue_stats {
        months.entry(entry.month.as_str()).or_default().1 = Some(entry.amount);
    }
    months
        .into_iter()
        .map(|(month, (hours, amount))| (month.to_string(), hours, amount))
        .collect()
}

/// Reservation the user has not released yet, if any.
pub fn active_reservation(records: &[ReservationRecord]) -> Option<&ReservationRecord> {
    records.iter().find(|r| r.is_active())
}

#[component]
pub fn UserDashboardPage() -> impl IntoView {
    let api = use_api();
    let refresh = create_rw_signal(0u32);
    let error = create_rw_signal(None::<ApiError>);
    let notice = create_rw_signal(None::<String>);

    let lots_api = api.clone();
    let lots = create_resource(
        move || refresh.get(),
        move |_| {
            let api = lots_api.clone();
            async move { api.user_list_lots().await }
        },
    );
    let history_api = api.clone();
    let history = create_resource(
        move || refresh.get(),
        move |_| {
            let api = history_api.clone();
            async move { api.my_reservations().await }
        },
    );
    let analytics_api = api.clone();
    let analytics = create_resource(
        move || refresh.get(),
        move |_| {
            let api = analytics_api.clone();
            async move { api.user_analytics().await }
        },
    );

    let action_api = api;
    let parking_action = create_action(move |action: &ParkingAction| {
        let api = action_api.clone();
        let action = *action;
        async move {
            match action {
                ParkingAction::Reserve(lot_id) => api.reserve_spot(lot_id).await.map(|r| {
                    format!("{}: spot {} (reservation {})", r.message, r.spot_id, r.reservation_id)
                }),
                ParkingAction::Release(reservation_id) => {
                    api.release_spot(reservation_id).await.map(|r| {
                        format!(
                            "{}: {} h charged, cost {}",
                            r.message,
                            r.hours_charged,
                            format_amount(r.parking_cost)
                        )
                    })
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = parking_action.value().get() {
            match result {
                Ok(message) => {
                    error.set(None);
                    notice.set(Some(message));
                    refresh.update(|n| *n += 1);
                }
                Err(err) => {
                    notice.set(None);
                    error.set(Some(err));
                }
            }
        }
    });

    let on_reserve = Callback::new(move |lot_id: i64| {
        parking_action.dispatch(ParkingAction::Reserve(lot_id))
    });
    let on_release = Callback::new(move |reservation_id: i64| {
        parking_action.dispatch(ParkingAction::Release(reservation_id))
    });

    view! {
        <PageFrame title="User Dashboard" home_href=Page::UserDashboard.href()>
            <InlineErrorMessage error=error.into()/>
            <SuccessMessage message=notice.into()/>
            <Suspense fallback=|| ()>
                {move || analytics.get().and_then(Result::ok).map(|a| view! { <Totals analytics=a/> })}
            </Suspense>
            <section class="space-y-3">
                <h3 class="text-lg font-semibold text-fg">"Available lots"</h3>
                <Suspense fallback=move || view! { <LoadingSpinner/> }>
                    {move || lots.get().map(|result| match result {
                        Ok(lots) if lots.is_empty() => view! {
                            <EmptyState title="No parking lots available"/>
                        }.into_view(),
                        Ok(lots) => view! { <LotList lots=lots on_reserve=on_reserve/> }.into_view(),
                        Err(err) => err.into_view(),
                    })}
                </Suspense>
            </section>
            <section class="space-y-3">
                <h3 class="text-lg font-semibold text-fg">"My reservations"</h3>
                <Suspense fallback=move || view! { <LoadingSpinner/> }>
                    {move || history.get().map(|result| match result {
                        Ok(records) if records.is_empty() => view! {
                            <EmptyState title="No reservations yet" description="Reserve a spot in one of the lots above."/>
                        }.into_view(),
                        Ok(records) => view! { <ReservationList records=records on_release=on_release/> }.into_view(),
                        Err(err) => err.into_view(),
                    })}
                </Suspense>
            </section>
        </PageFrame>
    }
}

#[component]
fn Totals(analytics: UserAnalytics) -> impl IntoView {
    let rows = monthly_rows(&analytics);
    view! {
        <div class="grid grid-cols-2 gap-4">
            <div class="rounded-lg bg-surface-elevated p-4">
                <div class="text-sm text-fg-muted">"Hours parked"</div>
                <div class="text-2xl font-bold text-fg">{format_amount(analytics.total_hours)}</div>
            </div>
            <div class="rounded-lg bg-surface-elevated p-4">
                <div class="text-sm text-fg-muted">"Total spent"</div>
                <div class="text-2xl font-bold text-fg">{format_amount(analytics.total_spent)}</div>
            </div>
        </div>
        {(!rows.is_empty()).then(|| view! { <MonthlyTable rows=rows/> })}
    }
}

#[component]
fn MonthlyTable(rows: Vec<(String, Option<f64>, Option<f64>)>) -> impl IntoView {
    let cell = |value: Option<f64>| value.map(format_amount).unwrap_or_else(|| "-".into());
    view! {
        <table class="min-w-full divide-y divide-border">
            <thead>
                <tr>
                    <th>"Month"</th>
                    <th>"Hours"</th>
                    <th>"Spent"</th>
                </tr>
            </thead>
            <tbody>
                {rows.into_iter().map(|(month, hours, amount)| view! {
                    <tr>
                        <td>{month}</td>
                        <td>{cell(hours)}</td>
                        <td>{cell(amount)}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
}

#[component]
fn LotList(lots: Vec<UserLot>, on_reserve: Callback<i64>) -> impl IntoView {
    view! {
        <ul class="divide-y divide-border">
            {lots.into_iter().map(|lot| {
                let lot_id = lot.lot_id;
                let full = lot.available_spots <= 0;
                view! {
                    <li class="py-2 flex justify-between items-center">
                        <div>
                            <div class="font-medium text-fg">{lot.prime_location_name}</div>
                            <div class="text-sm text-fg-muted">
                                {lot.address.unwrap_or_default()}" · "
                                {format_amount(lot.price)}"/h · "
                                {lot.available_spots}" of "{lot.total_spots}" free"
                            </div>
                        </div>
                        <button
                            class="py-1 px-3 rounded-md text-action-primary-text bg-action-primary-bg disabled:opacity-50"
                            disabled=full
                            on:click=move |_| on_reserve.call(lot_id)
                        >
                            "Reserve"
                        </button>
                    </li>
                }
            }).collect_view()}
        </ul>
    }
}

#[component]
fn ReservationList(records: Vec<ReservationRecord>, on_release: Callback<i64>) -> impl IntoView {
    let parked_at = active_reservation(&records).map(|r| r.spot_id);
    view! {
        <div class="space-y-2">
            {parked_at.map(|spot| view! {
                <p class="text-sm text-fg">"Currently parked at spot "{spot}</p>
            })}
            <table class="min-w-full divide-y divide-border">
                <thead>
                    <tr>
                        <th>"Lot"</th>
                        <th>"Spot"</th>
                        <th>"Parked"</th>
                        <th>"Left"</th>
                        <th>"Duration"</th>
                        <th>"Cost"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {records.into_iter().map(|record| {
                        let reservation_id = record.reservation_id;
                        let active = record.is_active();
                        view! {
                            <tr>
                                <td>{record.lot_name.unwrap_or_else(|| "-".into())}</td>
                                <td>{record.spot_id}</td>
                                <td>{format_timestamp(record.parking_timestamp)}</td>
                                <td>{format_timestamp(record.leaving_timestamp)}</td>
                                <td>{record.duration.unwrap_or_else(|| "-".into())}</td>
                                <td>{record.parking_cost.map(format_amount).unwrap_or_else(|| "-".into())}</td>
                                <td>
                                    <Show when=move || active fallback=|| ()>
                                        <button
                                            class="text-sm text-action-primary-bg"
                                            on:click=move |_| on_release.call(reservation_id)
                                        >
                                            "Release"
                                        </button>
                                    </Show>
                                </td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}
