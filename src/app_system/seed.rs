//! Demo data the canteen starts with.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::domain::{CartItem, MenuItem, Order, OrderStatus};

const IMAGE_BASE: &str = "https://images.pexels.com/photos";

fn dish(id: &str, name: &str, price: i64, category: &str, photo: &str) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        price: Decimal::from(price),
        category: category.to_string(),
        image_url: format!("{IMAGE_BASE}/{photo}"),
        available: true,
    }
}

pub fn demo_menu() -> Vec<MenuItem> {
    vec![
        dish("1", "Idly (2 pcs)", 30, "Breakfast", "8695679/pexels-photo-8695679.jpeg"),
        dish("2", "Masala Dosa", 60, "Breakfast", "5560763/pexels-photo-5560763.jpeg"),
        dish("3", "Puri with Sabji (2 pcs)", 40, "Breakfast", "10360057/pexels-photo-10360057.jpeg"),
        dish("4", "Aloo Paratha", 50, "Breakfast", "4518731/pexels-photo-4518731.jpeg"),
        dish("5", "Veg Fried Rice", 80, "Lunch", "1092730/pexels-photo-1092730.jpeg"),
        dish("6", "Chicken Fried Rice", 120, "Lunch", "3926124/pexels-photo-3926124.jpeg"),
        dish("7", "South Indian Thali (Meals)", 100, "Lunch", "958545/pexels-photo-958545.jpeg"),
    ]
}

/// One delivered order from yesterday for the demo student.
pub fn demo_orders() -> Vec<Order> {
    let dosa = dish("2", "Masala Dosa", 60, "Breakfast", "5560763/pexels-photo-5560763.jpeg");
    vec![Order {
        id: "ord1".to_string(),
        user_id: "student1".to_string(),
        user_email: "student@college.com".to_string(),
        total: Decimal::from(120),
        items: vec![CartItem::new(dosa, 2)],
        status: OrderStatus::Delivered,
        created_at: Utc::now() - Duration::days(1),
    }]
}
