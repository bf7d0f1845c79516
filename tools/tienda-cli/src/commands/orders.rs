//! Order history commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use tienda_commerce::checkout::{Order, OrderRepository};
use tienda_commerce::display::{format_price, item_subtotal, product_name};

use super::{OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::{status_badge, truncate};

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    let orders = OrderRepository::new(ctx.store()?);

    match args.command {
        OrdersCommand::List { email } => {
            let list = match email.as_deref() {
                Some(email) => orders.by_user_email(email)?,
                None => orders.get_orders()?,
            };
            list_orders(&list, ctx);
            Ok(())
        }
        OrdersCommand::Show { id } => {
            let Some(order) = orders.get_order(&id)? else {
                bail!("Orden no encontrada: {id}");
            };
            show_order(&order, ctx);
            Ok(())
        }
        OrdersCommand::Clear { yes } => {
            let count = orders.count()?;
            if count == 0 {
                ctx.output.info("No hay órdenes guardadas.");
                return Ok(());
            }
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("¿Eliminar {count} órdenes?"))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Operación cancelada");
                    return Ok(());
                }
            }
            orders.clear_orders()?;
            ctx.output.success(&format!("Eliminadas {count} órdenes."));
            Ok(())
        }
    }
}

fn list_orders(orders: &[Order], ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return;
    }
    if orders.is_empty() {
        ctx.output.info("No hay órdenes.");
        return;
    }

    let widths = [12, 22, 24, 10, 10];
    ctx.output
        .table_header(&["orden", "fecha", "cliente", "total", "estado"], &widths);
    for order in orders {
        let fecha = order.formatted_date();
        let cliente = truncate(&order.customer.nombre, widths[2]);
        let total = format_price(&order.total.to_string());
        let estado = status_badge(order.status.display_name());
        ctx.output.table_row(
            &[order.display_id(), &fecha, &cliente, &total, &estado],
            &widths,
        );
    }
}

fn show_order(order: &Order, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(order);
        return;
    }

    ctx.output.header(order.display_id());
    ctx.output.kv("Fecha", &order.formatted_date());
    ctx.output.kv("Estado", &status_badge(order.status.display_name()));
    if let Some(error) = &order.error {
        ctx.output.kv("Motivo", error);
    }
    ctx.output.kv("Cliente", &order.customer.nombre);
    ctx.output.kv(
        "Dirección",
        &format!("{}, {} ({})", order.customer.direccion, order.customer.ciudad, order.customer.codigo),
    );
    ctx.output.kv("Pago", order.customer.metodo.display_name());
    if let Some(email) = &order.user_email {
        ctx.output.kv("Correo", email);
    }

    let widths = [28, 6, 12];
    println!();
    ctx.output.table_header(&["producto", "cant.", "subtotal"], &widths);
    for item in &order.items {
        let nombre = truncate(product_name(&item.product), widths[0]);
        let qty = item.qty.to_string();
        let subtotal = format!("${:.2}", item_subtotal(item));
        ctx.output.table_row(&[&nombre, &qty, &subtotal], &widths);
    }
    ctx.output.kv("Total", &format!("${}", format_price(&order.total.to_string())));
}
