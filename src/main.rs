use canteen::app_system::{load_settings, setup_tracing, CanteenSystem};
use canteen::domain::OrderStatus;
use canteen::router::{AdminTab, View};
use canteen::session::INVALID_CREDENTIALS_MESSAGE;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let settings = load_settings().map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing(&settings.log_filter);

    info!("Starting canteen with demo data");

    let system = CanteenSystem::new(&settings);

    // Student: browse, fill the cart, place an order
    let mut student = system.session();
    let span = tracing::info_span!("student_session");
    let placed = async {
        if student
            .login("student@college.com", "password123")
            .await
            .map_err(|e| e.to_string())?
            .is_none()
        {
            return Err(INVALID_CREDENTIALS_MESSAGE.to_string());
        }

        let menu = student.menu().await.map_err(|e| e.to_string())?;
        info!(items = menu.len(), "Menu loaded");

        for item in menu.iter().filter(|item| item.category == "Breakfast").take(2) {
            student.add_to_cart(item).map_err(|e| e.to_string())?;
        }
        if let Some(first) = menu.first() {
            student.add_to_cart(first).map_err(|e| e.to_string())?;
        }
        info!(units = student.cart().unit_count(), total = %student.cart().total(), "Cart ready");

        let order = student.place_order().await.map_err(|e| e.to_string())?;
        info!(order_id = %order.id, total = %order.total, view = ?student.view(), "Order placed");
        Ok::<_, String>(order)
    }
    .instrument(span)
    .await?;

    // A failed login never says which half was wrong
    let mut intruder = system.session();
    match intruder.login("admin@college.com", "letmein").await {
        Ok(None) => warn!("{INVALID_CREDENTIALS_MESSAGE}"),
        Ok(Some(_)) => error!("Unexpected login success"),
        Err(e) => error!(error = %e, "Login failed"),
    }

    // Admin: move the new order along and review everything
    let mut admin = system.session();
    let span = tracing::info_span!("admin_session");
    async {
        admin
            .login("admin@college.com", "adminpassword")
            .await
            .map_err(|e| e.to_string())?;

        if let Err(e) = admin.place_order().await {
            info!(error = %e, "Admins cannot order, as expected");
        }

        for status in [OrderStatus::Preparing, OrderStatus::Delivered] {
            let order = admin
                .set_order_status(&placed.id, status)
                .await
                .map_err(|e| e.to_string())?;
            info!(order_id = %order.id, status = %order.status, "Order advanced");
        }

        admin.navigate(View::AdminDashboard(AdminTab::Menu));
        for order in admin.all_orders().await.map_err(|e| e.to_string())? {
            info!(
                order_id = %order.id,
                user = %order.user_email,
                status = %order.status,
                total = %order.total,
                created_at = %order.created_at,
                "Order"
            );
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let history = student.my_orders().await.map_err(|e| e.to_string())?;
    info!(orders = history.len(), "Student order history loaded");

    student.logout();
    admin.logout();

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Canteen demo completed successfully");
    Ok(())
}
