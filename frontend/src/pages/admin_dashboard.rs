use crate::{
    api::{use_api, AdminLot, AdminUser, ApiError, LotInput, ParkingLot},
    components::{
        empty_state::EmptyState,
        error::InlineErrorMessage,
        layout::{LoadingSpinner, PageFrame, SuccessMessage},
    },
    router::Page,
};
use leptos::{ev::SubmitEvent, *};

/// Raw text of the create-lot form.
#[derive(Clone, Copy)]
struct LotForm {
    name: RwSignal<String>,
    price: RwSignal<String>,
    address: RwSignal<String>,
    pin_code: RwSignal<String>,
    spots: RwSignal<String>,
}

impl LotForm {
    fn new() -> Self {
        Self {
            name: create_rw_signal(String::new()),
            price: create_rw_signal(String::new()),
            address: create_rw_signal(String::new()),
            pin_code: create_rw_signal(String::new()),
            spots: create_rw_signal(String::new()),
        }
    }

    fn reset(&self) {
        for field in [
            self.name,
            self.price,
            self.address,
            self.pin_code,
            self.spots,
        ] {
            field.set(String::new());
        }
    }

    /// Loads an existing lot into the form for editing.
    fn fill(&self, lot: &ParkingLot) {
        self.name.set(lot.prime_location_name.clone());
        self.price.set(lot.price_per_hour.to_string());
        self.address.set(lot.address.clone().unwrap_or_default());
        self.pin_code.set(lot.pin_code.clone().unwrap_or_default());
        self.spots.set(lot.number_of_spots.to_string());
    }

    fn to_input(self) -> Result<LotInput, ApiError> {
        parse_lot_input(
            &self.name.get_untracked(),
            &self.price.get_untracked(),
            &self.address.get_untracked(),
            &self.pin_code.get_untracked(),
            &self.spots.get_untracked(),
        )
    }
}

pub fn parse_lot_input(
    name: &str,
    price: &str,
    address: &str,
    pin_code: &str,
    spots: &str,
) -> Result<LotInput, ApiError> {
    let fields = [
        ("prime_location_name", name),
        ("price_per_hour", price),
        ("address", address),
        ("pin_code", pin_code),
        ("number_of_spots", spots),
    ];
    if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ApiError::validation(format!("Missing field: {}", field)));
    }
    let price_per_hour = price
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| ApiError::validation("Price per hour must be a number"))?;
    let number_of_spots = spots
        .trim()
        .parse::<u32>()
        .map_err(|_| ApiError::validation("Number of spots must be a whole number"))?;
    Ok(LotInput {
        prime_location_name: name.trim().to_string(),
        price_per_hour,
        address: address.trim().to_string(),
        pin_code: pin_code.trim().to_string(),
        number_of_spots,
    })
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let api = use_api();
    let refresh = create_rw_signal(0u32);
    let error = create_rw_signal(None::<ApiError>);
    let notice = create_rw_signal(None::<String>);
    let form = LotForm::new();
    let editing = create_rw_signal(None::<i64>);

    let lots_api = api.clone();
    let lots = create_resource(
        move || refresh.get(),
        move |_| {
            let api = lots_api.clone();
            async move { api.admin_list_lots().await }
        },
    );
    let users_api = api.clone();
    let users = create_resource(
        move || refresh.get(),
        move |_| {
            let api = users_api.clone();
            async move { api.admin_list_users().await }
        },
    );

    let create_api = api.clone();
    let create_lot = create_action(move |input: &LotInput| {
        let api = create_api.clone();
        let input = input.clone();
        async move { api.admin_create_lot(&input).await.map(|r| r.message) }
    });
    let update_api = api.clone();
    let update_lot = create_action(move |(lot_id, input): &(i64, LotInput)| {
        let api = update_api.clone();
        let (lot_id, input) = (*lot_id, input.clone());
        async move { api.admin_update_lot(lot_id, &input).await.map(|r| r.message) }
    });
    let delete_api = api;
    let delete_lot = create_action(move |lot_id: &i64| {
        let api = delete_api.clone();
        let lot_id = *lot_id;
        async move { api.admin_delete_lot(lot_id).await.map(|r| r.message) }
    });

    create_effect(move |_| {
        if let Some(result) = create_lot.value().get() {
            if result.is_ok() {
                form.reset();
            }
            apply_result(result, error, notice, refresh);
        }
    });
    create_effect(move |_| {
        if let Some(result) = update_lot.value().get() {
            if result.is_ok() {
                form.reset();
                editing.set(None);
            }
            apply_result(result, error, notice, refresh);
        }
    });
    create_effect(move |_| {
        if let Some(result) = delete_lot.value().get() {
            apply_result(result, error, notice, refresh);
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        match form.to_input() {
            Ok(input) => {
                error.set(None);
                match editing.get_untracked() {
                    Some(lot_id) => update_lot.dispatch((lot_id, input)),
                    None => create_lot.dispatch(input),
                }
            }
            Err(err) => error.set(Some(err)),
        }
    };
    let on_edit = Callback::new(move |lot: ParkingLot| {
        form.fill(&lot);
        editing.set(Some(lot.id));
    });
    let on_cancel_edit = move |_: ev::MouseEvent| {
        form.reset();
        editing.set(None);
    };
    let on_delete = Callback::new(move |lot_id: i64| delete_lot.dispatch(lot_id));
    let saving = move || create_lot.pending().get() || update_lot.pending().get();

    view! {
        <PageFrame title="Admin Dashboard" home_href=Page::AdminDashboard.href()>
            <InlineErrorMessage error=error.into()/>
            <SuccessMessage message=notice.into()/>
            <section class="space-y-3">
                <h3 class="text-lg font-semibold text-fg">"Parking lots"</h3>
                <Suspense fallback=move || view! { <LoadingSpinner/> }>
                    {move || lots.get().map(|result| match result {
                        Ok(lots) if lots.is_empty() => view! {
                            <EmptyState title="No parking lots yet" description="Create one below."/>
                        }.into_view(),
                        Ok(lots) => view! {
                            <LotTable lots=lots on_edit=on_edit on_delete=on_delete/>
                        }.into_view(),
                        Err(err) => err.into_view(),
                    })}
                </Suspense>
            </section>
            <section class="space-y-3">
                <h3 class="text-lg font-semibold text-fg">
                    {move || match editing.get() {
                        Some(lot_id) => format!("Edit lot {}", lot_id),
                        None => "New lot".to_string(),
                    }}
                </h3>
                <form class="grid grid-cols-1 md:grid-cols-5 gap-2" on:submit=on_submit>
                    <LotField value=form.name placeholder="Location name"/>
                    <LotField value=form.price placeholder="Price per hour"/>
                    <LotField value=form.address placeholder="Address"/>
                    <LotField value=form.pin_code placeholder="Pin code"/>
                    <LotField value=form.spots placeholder="Number of spots"/>
                    <button
                        type="submit"
                        disabled=saving
                        class="py-2 px-4 rounded-md text-action-primary-text bg-action-primary-bg disabled:opacity-50"
                    >
                        {move || if editing.get().is_some() { "Save changes" } else { "Create lot" }}
                    </button>
                    <Show when=move || editing.get().is_some() fallback=|| ()>
                        <button type="button" class="py-2 px-4 text-sm text-fg-muted" on:click=on_cancel_edit>
                            "Cancel"
                        </button>
                    </Show>
                </form>
            </section>
            <section class="space-y-3">
                <h3 class="text-lg font-semibold text-fg">"Users"</h3>
                <Suspense fallback=move || view! { <LoadingSpinner/> }>
                    {move || users.get().map(|result| match result {
                        Ok(users) if users.is_empty() => view! {
                            <EmptyState title="No registered users"/>
                        }.into_view(),
                        Ok(users) => view! { <UserTable users=users/> }.into_view(),
                        Err(err) => err.into_view(),
                    })}
                </Suspense>
            </section>
        </PageFrame>
    }
}

fn apply_result(
    result: Result<String, ApiError>,
    error: RwSignal<Option<ApiError>>,
    notice: RwSignal<Option<String>>,
    refresh: RwSignal<u32>,
) {
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

#[component]
fn LotField(value: RwSignal<String>, placeholder: &'static str) -> impl IntoView {
    view! {
        <input
            type="text"
            class="px-3 py-2 border border-border rounded-md"
            placeholder=placeholder
            prop:value=value
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
}

#[component]
fn LotTable(
    lots: Vec<AdminLot>,
    on_edit: Callback<ParkingLot>,
    on_delete: Callback<i64>,
) -> impl IntoView {
    view! {
        <table class="min-w-full divide-y divide-border">
            <thead>
                <tr>
                    <th>"Location"</th>
                    <th>"Address"</th>
                    <th>"Price/h"</th>
                    <th>"Available"</th>
                    <th>"Occupied"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>
                {lots.into_iter().map(|row| {
                    let lot_id = row.lot.id;
                    let has_cars = row.occupied_spots > 0;
                    let spots_href = Page::LotSpots { lot_id: lot_id.to_string() }.href();
                    let lot = row.lot.clone();
                    view! {
                        <tr>
                            <td><a href=spots_href class="text-action-primary-bg">{row.lot.prime_location_name}</a></td>
                            <td>{row.lot.address.unwrap_or_default()}</td>
                            <td>{format!("{:.2}", row.lot.price_per_hour)}</td>
                            <td>{row.available_spots}</td>
                            <td>{row.occupied_spots}</td>
                            <td class="space-x-2">
                                <button
                                    class="text-action-primary-bg text-sm"
                                    on:click=move |_| on_edit.call(lot.clone())
                                >
                                    "Edit"
                                </button>
                                <button
                                    class="text-action-danger-bg text-sm"
                                    disabled=has_cars
                                    on:click=move |_| on_delete.call(lot_id)
                                >
                                    "Delete"
                                </button>
                            </td>
                        </tr>
                    }
                }).collect_view()}
            </tbody>
        </table>
    }
}

#[component]
fn UserTable(users: Vec<AdminUser>) -> impl IntoView {
    view! {
        <table class="min-w-full divide-y divide-border">
            <thead>
                <tr>
                    <th>"Username"</th>
                    <th>"Email"</th>
                    <th>"Active spot"</th>
                </tr>
            </thead>
            <tbody>
                {users.into_iter().map(|user| view! {
                    <tr>
                        <td>{user.username}</td>
                        <td>{user.email.unwrap_or_else(|| "-".into())}</td>
                        <td>{user.active_spot.map(|s| s.to_string()).unwrap_or_else(|| "-".into())}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::{render_to_string, with_runtime};

    #[test]
    fn dashboard_renders_sections_while_loading() {
        let html = render_to_string(|| view! { <AdminDashboardPage/> });
        assert!(html.contains("Admin Dashboard"));
        assert!(html.contains("Parking lots"));
        assert!(html.contains("Create lot"));
    }

    #[test]
    fn lot_table_links_to_spot_page() {
        let html = render_to_string(|| {
            let lots = vec![AdminLot {
                lot: ParkingLot {
                    id: 42,
                    prime_location_name: "Central".into(),
                    price_per_hour: 20.0,
                    address: Some("1 Main St".into()),
                    pin_code: None,
                    number_of_spots: 2,
                },
                available_spots: 1,
                occupied_spots: 1,
            }];
            view! {
                <LotTable lots=lots on_edit=Callback::new(|_| ()) on_delete=Callback::new(|_| ())/>
            }
        });
        assert!(html.contains("href=\"/admin/lot/42/spots\""));
        assert!(html.contains("Central"));
        assert!(html.contains("20.00"));
        assert!(html.contains("Edit"));
    }

    #[test]
    fn editing_a_lot_round_trips_through_the_form() {
        with_runtime(|| {
            let form = LotForm::new();
            form.fill(&ParkingLot {
                id: 7,
                prime_location_name: "Central".into(),
                price_per_hour: 12.5,
                address: Some("1 Main St".into()),
                pin_code: Some("560001".into()),
                number_of_spots: 6,
            });
            assert_eq!(
                form.to_input().unwrap(),
                LotInput {
                    prime_location_name: "Central".into(),
                    price_per_hour: 12.5,
                    address: "1 Main St".into(),
                    pin_code: "560001".into(),
                    number_of_spots: 6,
                }
            );

            form.reset();
            assert_eq!(
                form.to_input().unwrap_err().error,
                "Missing field: prime_location_name"
            );
        });
    }
}
