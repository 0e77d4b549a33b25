//! Product option tools (e.g. Size, Color) and their values.

mod create;
mod delete;
mod update;

pub use create::{
    CreateProductOptionsParams, CreateProductOptionsTool, OptionCreateVariantStrategy, OptionInput,
};
pub use delete::{DeleteProductOptionsParams, DeleteProductOptionsTool, OptionDeleteStrategy};
pub use update::{
    OptionUpdateVariantStrategy, OptionValueRename, UpdateProductOptionParams,
    UpdateProductOptionTool,
};

/// Product with its options, returned by every option mutation.
pub(crate) const PRODUCT_OPTIONS: &str = r#"
fragment ProductOptions on Product {
  id
  title
  options {
    id
    name
    position
    optionValues { id name hasVariants }
  }
}
"#;
