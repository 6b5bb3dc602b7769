//! `catalog-cli add`: fills the add-product form from arguments and submits it.

use std::path::PathBuf;

use catalog_core::{SyncResult, ADD_PRODUCT_FAILED};
use catalog_sync::{AddProductForm, ImageRef};

use crate::render;
use crate::state::AppState;

/// Form fields as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct AddInput {
    pub name: String,
    pub product_type: String,
    pub price: String,
    pub tax: String,
    pub image: Option<PathBuf>,
}

pub async fn run(state: &AppState, input: AddInput) -> anyhow::Result<()> {
    let form = fill(AddProductForm::new(state.service.clone()), input);

    if !form.can_submit() {
        anyhow::bail!("product name and type must not be blank");
    }

    let outcome = form.submit().await;

    match outcome {
        SyncResult::Success { .. } => {
            print!("{}", render::submission(&outcome));
            Ok(())
        }
        _ => {
            let message = form
                .status()
                .error_message
                .unwrap_or_else(|| ADD_PRODUCT_FAILED.to_string());
            anyhow::bail!(message)
        }
    }
}

/// Copies the arguments into the form the way a user would type them.
pub fn fill(mut form: AddProductForm, input: AddInput) -> AddProductForm {
    form.set_product_name(input.name);
    form.set_product_type(input.product_type);
    form.set_price(input.price);
    form.set_tax(input.tax);

    if let Some(path) = input.image {
        form.select_image(ImageRef::new(path));
    }

    form
}
