//! # Add-Product Form
//!
//! State holder behind the "add product" screen: the fields being edited and
//! the status flags of the last submission.
//!
//! ## Submission Status
//! ```text
//! ┌────────────────────────┬────────────┬─────────────────────────┬────────────┐
//! │ Moment                 │ is_loading │ error_message           │ is_success │
//! ├────────────────────────┼────────────┼─────────────────────────┼────────────┤
//! │ before submit          │ false      │ (previous)              │ (previous) │
//! │ submit started         │ true       │ None                    │ (previous) │
//! │ amount rejected        │ false      │ "price must not be ..." │ (previous) │
//! │ service: Error         │ false      │ "Failed to add product" │ (previous) │
//! │ service: Success       │ false      │ None                    │ true       │
//! └────────────────────────┴────────────┴─────────────────────────┴────────────┘
//! ```

use catalog_core::validation::{parse_amount, validate_submission};
use catalog_core::{AddProductResponse, Product, SyncResult, ADD_PRODUCT_FAILED};
use futures_util::StreamExt;
use tokio::sync::watch;
use tracing::{error, info};

use crate::files::ImageRef;
use crate::service::ProductSyncService;

/// Flags observed by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionStatus {
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub is_success: bool,
}

/// Fields of the add-product form plus its submission status.
pub struct AddProductForm {
    service: ProductSyncService,
    product_name: String,
    product_type: String,
    price: String,
    tax: String,
    image: Option<ImageRef>,
    status: watch::Sender<SubmissionStatus>,
}

impl AddProductForm {
    /// Empty form.
    pub fn new(service: ProductSyncService) -> Self {
        let (status, _) = watch::channel(SubmissionStatus::default());

        AddProductForm {
            service,
            product_name: String::new(),
            product_type: String::new(),
            price: String::new(),
            tax: String::new(),
            image: None,
            status,
        }
    }

    pub fn set_product_name(&mut self, name: impl Into<String>) {
        self.product_name = name.into();
    }

    pub fn set_product_type(&mut self, product_type: impl Into<String>) {
        self.product_type = product_type.into();
    }

    /// Raw price text as typed.
    pub fn set_price(&mut self, price: impl Into<String>) {
        self.price = price.into();
    }

    /// Raw tax text as typed.
    pub fn set_tax(&mut self, tax: impl Into<String>) {
        self.tax = tax.into();
    }

    pub fn select_image(&mut self, image: ImageRef) {
        self.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    /// Product that would be submitted now.
    ///
    /// Empty amount text becomes `0.0`; unparsable text becomes absent.
    pub fn product(&self) -> Product {
        Product {
            product_name: self.product_name.clone(),
            product_type: self.product_type.clone(),
            price: parse_amount(&self.price),
            tax: parse_amount(&self.tax),
            ..Default::default()
        }
    }

    /// True when name and type are filled in and nothing is in flight.
    pub fn can_submit(&self) -> bool {
        !self.status.borrow().is_loading
            && !self.product_name.trim().is_empty()
            && !self.product_type.trim().is_empty()
    }

    /// Current status flags.
    pub fn status(&self) -> SubmissionStatus {
        self.status.borrow().clone()
    }

    /// Receiver of status flag changes.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status.subscribe()
    }

    /// Submits the form once and returns the service's terminal state.
    pub async fn submit(&self) -> SyncResult<AddProductResponse> {
        self.status.send_modify(|status| {
            status.is_loading = true;
            status.error_message = None;
        });

        let product = self.product();

        if let Err(e) = validate_submission(&product) {
            let message = e.to_string();
            self.status.send_modify(|status| {
                status.is_loading = false;
                status.error_message = Some(message.clone());
            });
            return SyncResult::error(message, None);
        }

        let outcomes = self.service.add_product(product, self.image.clone());
        futures_util::pin_mut!(outcomes);

        let mut last = SyncResult::error(ADD_PRODUCT_FAILED, None);
        while let Some(outcome) = outcomes.next().await {
            match &outcome {
                SyncResult::Loading => {
                    self.status.send_modify(|status| status.is_loading = true);
                }
                SyncResult::Success { data } => {
                    info!(
                        product_name = %self.product_name,
                        product_id = data.product_id,
                        "Product added"
                    );
                    self.status.send_modify(|status| {
                        status.is_success = true;
                        status.error_message = None;
                    });
                }
                SyncResult::Error { message, .. } => {
                    error!(cause = %message, "Failed to add product");
                    self.status.send_modify(|status| {
                        status.error_message = Some(ADD_PRODUCT_FAILED.to_string());
                    });
                }
            }
            last = outcome;
        }

        self.status.send_modify(|status| status.is_loading = false);
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::tests::{added_response, repository, FakeFiles, FakeTransport, Reply};
    use crate::protocol::FilePart;
    use std::sync::Arc;

    async fn form(transport: Arc<FakeTransport>) -> AddProductForm {
        AddProductForm::new(ProductSyncService::new(
            transport,
            Arc::new(repository().await),
            Arc::new(FakeFiles),
        ))
    }

    #[tokio::test]
    async fn test_amount_text_parsing() {
        let mut form = form(Arc::new(FakeTransport::new(Reply::Network))).await;
        form.set_product_name("Red Shirt");
        form.set_product_type("Apparel");

        assert_eq!(form.product().price, Some(0.0));
        assert_eq!(form.product().tax, Some(0.0));

        form.set_price("499.5");
        form.set_tax("abc");
        assert_eq!(form.product().price, Some(499.5));
        assert_eq!(form.product().tax, None);
    }

    #[tokio::test]
    async fn test_can_submit_requires_name_and_type() {
        let mut form = form(Arc::new(FakeTransport::new(Reply::Network))).await;
        assert!(!form.can_submit());

        form.set_product_name("Red Shirt");
        assert!(!form.can_submit());

        form.set_product_type("Apparel");
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn test_successful_submit() {
        let transport = Arc::new(FakeTransport::new(Reply::Network));
        let mut form = form(transport.clone()).await;
        form.set_product_name("Red Shirt");
        form.set_product_type("Apparel");
        form.set_price("10");
        form.set_tax("5");
        form.select_image(ImageRef::from("/picked/shirt.png"));

        let outcome = form.submit().await;

        assert_eq!(outcome, SyncResult::success(added_response()));
        assert_eq!(
            form.status(),
            SubmissionStatus {
                is_loading: false,
                error_message: None,
                is_success: true,
            }
        );

        let submissions = transport.submissions.lock().unwrap();
        assert_eq!(submissions[0].price, "10.0");
        assert!(matches!(submissions[0].files, FilePart::File { .. }));
    }

    #[tokio::test]
    async fn test_failed_submit_uses_generic_message() {
        let transport = Arc::new(FakeTransport::new(Reply::Network));
        *transport.add.lock().unwrap() = Reply::Network;
        let mut form = form(transport).await;
        form.set_product_name("Red Shirt");
        form.set_product_type("Apparel");

        let outcome = form.submit().await;

        assert_eq!(outcome.error_message(), Some("connection refused"));
        assert_eq!(
            form.status(),
            SubmissionStatus {
                is_loading: false,
                error_message: Some("Failed to add product".to_string()),
                is_success: false,
            }
        );
    }

    #[tokio::test]
    async fn test_negative_amount_is_rejected_locally() {
        let transport = Arc::new(FakeTransport::new(Reply::Network));
        let mut form = form(transport.clone()).await;
        form.set_product_name("Red Shirt");
        form.set_product_type("Apparel");
        form.set_price("-1");

        let outcome = form.submit().await;

        assert_eq!(outcome.error_message(), Some("price must not be negative"));
        assert!(!form.status().is_loading);
        assert!(transport.submissions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cleared_image_submits_empty_part() {
        let transport = Arc::new(FakeTransport::new(Reply::Network));
        let mut form = form(transport.clone()).await;
        form.set_product_name("Blue Mug");
        form.set_product_type("Kitchen");
        form.select_image(ImageRef::from("/picked/shirt.png"));
        form.clear_image();
        assert!(form.image().is_none());

        form.submit().await;

        let submissions = transport.submissions.lock().unwrap();
        assert_eq!(submissions[0].files, FilePart::Empty);
    }

    #[tokio::test]
    async fn test_status_observers_see_final_flags() {
        let transport = Arc::new(FakeTransport::new(Reply::Network));
        let mut form = form(transport).await;
        form.set_product_name("Red Shirt");
        form.set_product_type("Apparel");
        let mut observer = form.subscribe();

        form.submit().await;

        assert!(observer.has_changed().unwrap());
        assert!(observer.borrow_and_update().is_success);
    }
}
