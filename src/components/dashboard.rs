//! Business analytics page. Each panel loads on its own so one failing
//! endpoint does not blank the rest.
use chrono::Utc;
use leptos::logging::{error, log};
use leptos::*;
use std::future::Future;

use crate::api::ApiClient;
use crate::errors::AppError;
use crate::models::dashboard::{
    format_money, CustomerStats, DashboardStats, DateRange, KolPerformance, KolSortKey, RevenuePoint,
    TopProduct,
};
use crate::session::Credentials;
use crate::state::dashboard::PanelSeq;

const DEFAULT_WINDOW_DAYS: i64 = 30;

type Panel<T> = RwSignal<Option<Result<T, AppError>>>;

fn panel_body<T: Clone + 'static, V: IntoView>(
    panel: Panel<T>,
    render: impl Fn(T) -> V + 'static,
) -> impl IntoView {
    move || match panel.get() {
        None => view! { <p class="loading">{ "Loading…" }</p> }.into_view(),
        Some(Err(err)) => view! { <p class="error-message">{ err.to_string() }</p> }.into_view(),
        Some(Ok(data)) => render(data).into_view(),
    }
}

/// Starts one panel's request. Its result is dropped if a newer request for
/// the same panel was issued meanwhile, or if the page is gone.
fn load_panel<T: 'static>(
    panel: Panel<T>,
    seq: StoredValue<PanelSeq>,
    label: &'static str,
    request: impl Future<Output = Result<T, AppError>> + 'static,
) {
    let Some(ticket) = seq.try_update_value(|s| s.issue()) else {
        return;
    };
    panel.set(None);
    spawn_local(async move {
        let result = request.await;
        if let Err(err) = &result {
            error!("[DASHBOARD] Loading {} failed: {}", label, err);
        }
        match seq.try_with_value(|s| s.is_latest(ticket)) {
            Some(true) => {
                panel.try_set(Some(result));
            }
            Some(false) => log!("[DASHBOARD] Dropping stale {} response #{}", label, ticket),
            None => {}
        }
    });
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let client = store_value(expect_context::<ApiClient>());
    let credentials = store_value(expect_context::<Credentials>());

    let today = Utc::now().date_naive();
    let range = create_rw_signal(DateRange::trailing_days(today, DEFAULT_WINDOW_DAYS));
    let (start_input, set_start_input) = create_signal(range.get_untracked().start().to_string());
    let (end_input, set_end_input) = create_signal(range.get_untracked().end().to_string());
    let (range_error, set_range_error) = create_signal(None::<String>);
    let kol_sort = create_rw_signal(KolSortKey::default());

    let stats: Panel<DashboardStats> = create_rw_signal(None);
    let revenue: Panel<Vec<RevenuePoint>> = create_rw_signal(None);
    let products: Panel<Vec<TopProduct>> = create_rw_signal(None);
    let kols: Panel<Vec<KolPerformance>> = create_rw_signal(None);
    let customers: Panel<CustomerStats> = create_rw_signal(None);

    let stats_seq = store_value(PanelSeq::default());
    let revenue_seq = store_value(PanelSeq::default());
    let products_seq = store_value(PanelSeq::default());
    let kols_seq = store_value(PanelSeq::default());
    let customers_seq = store_value(PanelSeq::default());

    create_effect(move |_| {
        let range = range.get();
        let (c, k) = (client.get_value(), credentials.get_value());
        load_panel(stats, stats_seq, "stats", async move { c.dashboard_stats(&k, &range).await });
        let (c, k) = (client.get_value(), credentials.get_value());
        load_panel(revenue, revenue_seq, "revenue", async move { c.revenue_series(&k, &range).await });
        let (c, k) = (client.get_value(), credentials.get_value());
        load_panel(products, products_seq, "top products", async move { c.top_products(&k, &range).await });
        let (c, k) = (client.get_value(), credentials.get_value());
        load_panel(customers, customers_seq, "customers", async move { c.customer_stats(&k, &range).await });
    });

    create_effect(move |_| {
        let range = range.get();
        let sort = kol_sort.get();
        let (c, k) = (client.get_value(), credentials.get_value());
        load_panel(kols, kols_seq, "KOL performance", async move {
            c.kol_performance(&k, &range, sort).await
        });
    });

    let apply_range = move |_: ev::MouseEvent| match DateRange::parse(&start_input.get_untracked(), &end_input.get_untracked()) {
        Ok(parsed) => {
            set_range_error.set(None);
            range.set(parsed);
        }
        Err(err) => set_range_error.set(Some(err.to_string())),
    };

    view! {
        <div class="dashboard-page">
            <h1>{ "Dashboard" }</h1>

            <div class="date-range">
                <input type="date" prop:value=move || start_input.get() on:input=move |e| set_start_input.set(event_target_value(&e)) />
                <span>{ "to" }</span>
                <input type="date" prop:value=move || end_input.get() on:input=move |e| set_end_input.set(event_target_value(&e)) />
                <button on:click=apply_range>{ "Apply" }</button>
                { move || range_error.get().map(|e| view! { <span class="error-message">{ e }</span> }) }
            </div>

            <section class="panel stats-cards">
                { panel_body(stats, |s: DashboardStats| view! {
                    <div class="card"><h3>{ "Revenue" }</h3><p>{ format_money(s.total_revenue) }</p></div>
                    <div class="card"><h3>{ "Orders" }</h3><p>{ s.total_orders }</p></div>
                    <div class="card"><h3>{ "Customers" }</h3><p>{ s.total_customers }</p></div>
                    <div class="card"><h3>{ "Avg. order" }</h3><p>{ format_money(s.average_order_value) }</p></div>
                    <div class="card"><h3>{ "Pending reviews" }</h3><p>{ s.pending_reviews }</p></div>
                }) }
            </section>

            <section class="panel revenue">
                <h2>{ "Revenue" }</h2>
                { panel_body(revenue, |points: Vec<RevenuePoint>| view! {
                    <table>
                        <thead><tr><th>{ "Date" }</th><th>{ "Revenue" }</th><th>{ "Orders" }</th></tr></thead>
                        <tbody>
                            { points.into_iter().map(|p| view! {
                                <tr><td>{ p.date }</td><td>{ format_money(p.revenue) }</td><td>{ p.orders }</td></tr>
                            }).collect_view() }
                        </tbody>
                    </table>
                }) }
            </section>

            <section class="panel top-products">
                <h2>{ "Top products" }</h2>
                { panel_body(products, |rows: Vec<TopProduct>| view! {
                    <table>
                        <thead><tr><th>{ "#" }</th><th>{ "Product" }</th><th>{ "SKU" }</th><th>{ "Sold" }</th><th>{ "Revenue" }</th></tr></thead>
                        <tbody>
                            { rows.into_iter().enumerate().map(|(rank, p)| view! {
                                <tr>
                                    <td>{ rank + 1 }</td>
                                    <td>{ p.name }</td>
                                    <td>{ p.sku.unwrap_or_default() }</td>
                                    <td>{ p.units_sold }</td>
                                    <td>{ format_money(p.revenue) }</td>
                                </tr>
                            }).collect_view() }
                        </tbody>
                    </table>
                }) }
            </section>

            <section class="panel kol-performance">
                <h2>{ "KOL performance" }</h2>
                <select on:change=move |e| {
                    if let Some(key) = KolSortKey::parse(&event_target_value(&e)) {
                        kol_sort.set(key);
                    }
                }>
                    { KolSortKey::ALL.into_iter().map(|key| view! {
                        <option value=key.as_str() selected=move || kol_sort.get() == key>{ key.as_str() }</option>
                    }).collect_view() }
                </select>
                { panel_body(kols, |rows: Vec<KolPerformance>| view! {
                    <table>
                        <thead><tr><th>{ "KOL" }</th><th>{ "Clicks" }</th><th>{ "Orders" }</th><th>{ "Conversion" }</th><th>{ "Commission" }</th></tr></thead>
                        <tbody>
                            { rows.into_iter().map(|k| view! {
                                <tr>
                                    <td>{ k.name.clone() }</td>
                                    <td>{ k.clicks }</td>
                                    <td>{ k.orders }</td>
                                    <td>{ format!("{:.1}%", k.conversion_rate()) }</td>
                                    <td>{ format_money(k.commission) }</td>
                                </tr>
                            }).collect_view() }
                        </tbody>
                    </table>
                }) }
            </section>

            <section class="panel customers">
                <h2>{ "Customers" }</h2>
                { panel_body(customers, |c: CustomerStats| view! {
                    <dl>
                        <dt>{ "Total" }</dt><dd>{ c.total_customers }</dd>
                        <dt>{ "New" }</dt><dd>{ c.new_customers }</dd>
                        <dt>{ "Returning" }</dt><dd>{ c.returning_customers }</dd>
                        <dt>{ "Avg. lifetime value" }</dt><dd>{ format_money(c.average_lifetime_value) }</dd>
                    </dl>
                }) }
            </section>
        </div>
    }
}
