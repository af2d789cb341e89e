use crate::{
    api::{use_api, ApiError, SpotDetail, SpotStatus},
    components::{
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{LoadingSpinner, PageFrame},
    },
    router::Page,
};
use leptos::*;

/// Lot ids are numeric on the backend; anything else never reaches it.
pub fn parse_lot_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::validation(format!("Invalid lot id: {}", raw)))
}

#[component]
pub fn LotSpotsPage(#[prop(into)] lot_id: String) -> impl IntoView {
    let api = use_api();
    let title = format!("Lot {} spots", lot_id);
    let parsed = parse_lot_id(&lot_id);
    let invalid = create_rw_signal(parsed.clone().err());

    let spots = create_resource(
        move || parsed.clone(),
        move |parsed| {
            let api = api.clone();
            async move {
                match parsed {
                    Ok(id) => api.admin_lot_spots(id).await.map(Some),
                    Err(_) => Ok(None),
                }
            }
        },
    );

    view! {
        <PageFrame title=title home_href=Page::AdminDashboard.href()>
            <a href=Page::AdminDashboard.href() class="text-sm text-action-primary-bg">"Back to lots"</a>
            <InlineErrorMessage error=invalid.into()/>
            <Suspense fallback=move || view! { <LoadingSpinner/> }>
                {move || spots.get().map(|result| match result {
                    Ok(Some(spots)) => view! { <SpotGrid spots=spots/> }.into_view(),
                    Ok(None) => ().into_view(),
                    Err(err) if err.status == Some(404) => view! {
                        <EmptyState title="No spots found" description="This lot does not exist or has no spots."/>
                    }.into_view(),
                    Err(err) => err.into_view(),
                })}
            </Suspense>
        </PageFrame>
    }
}

#[component]
fn SpotGrid(spots: Vec<SpotDetail>) -> impl IntoView {
    view! {
        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
            {spots.into_iter().map(|spot| {
                let tone = match spot.status {
                    SpotStatus::Available => "border-status-success-border",
                    SpotStatus::Occupied => "border-status-error-border",
                    SpotStatus::Unknown => "border-border",
                };
                view! {
                    <div class=format!("rounded-lg border-2 p-3 {}", tone)>
                        <div class="font-semibold text-fg">{format!("Spot {}", spot.spot_id)}</div>
                        <div class="text-sm text-fg-muted">{spot.status.label()}</div>
                        {spot.user_details.map(|occupant| view! {
                            <div class="text-xs text-fg-muted mt-1">
                                {format!("{} (#{}) since {}", occupant.username, occupant.user_id, occupant.parking_timestamp)}
                            </div>
                        })}
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lot_id_must_be_positive_integer() {
        assert_eq!(parse_lot_id("42").unwrap(), 42);
        assert_eq!(parse_lot_id(" 7 ").unwrap(), 7);
        assert!(parse_lot_id("abc").is_err());
        assert!(parse_lot_id("0").is_err());
        assert!(parse_lot_id("-3").is_err());
        assert_eq!(parse_lot_id("x").unwrap_err().error, "Invalid lot id: x");
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::SpotOccupant;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn page_shows_lot_id_in_title() {
        let html = render_to_string(|| view! { <LotSpotsPage lot_id="42"/> });
        assert!(html.contains("Lot 42 spots"));
        assert!(html.contains("Back to lots"));
    }

    #[test]
    fn non_numeric_lot_id_is_reported() {
        let html = render_to_string(|| view! { <LotSpotsPage lot_id="abc"/> });
        assert!(html.contains("Invalid lot id: abc"));
    }

    #[test]
    fn spot_grid_shows_occupant() {
        let html = render_to_string(|| {
            let spots = vec![
                SpotDetail {
                    spot_id: 1,
                    status: SpotStatus::Available,
                    user_details: None,
                },
                SpotDetail {
                    spot_id: 2,
                    status: SpotStatus::Occupied,
                    user_details: Some(SpotOccupant {
                        username: "alice".into(),
                        user_id: 3,
                        parking_timestamp: "Mon, 20 Oct 2025 10:00:00 GMT".into(),
                    }),
                },
            ];
            view! { <SpotGrid spots=spots/> }
        });
        assert!(html.contains("Spot 1"));
        assert!(html.contains("Available"));
        assert!(html.contains("alice (#3)"));
    }
}
