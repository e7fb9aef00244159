//! Field tables for the expense request bodies.

use once_cell::sync::Lazy;
use shared::{CreateExpenseRequest, UpdateExpenseRequest};

use super::validator::{FieldDescriptor, Validatable};
use super::value::AsFieldValue;

impl Validatable for CreateExpenseRequest {
    fn field_descriptors() -> &'static [FieldDescriptor<Self>] {
        static FIELDS: Lazy<Vec<FieldDescriptor<CreateExpenseRequest>>> = Lazy::new(|| {
            vec![
                FieldDescriptor::new("amount", None, "required,gt=0", |r: &CreateExpenseRequest| {
                    r.amount.field_value()
                }),
                FieldDescriptor::new("category", None, "required", |r: &CreateExpenseRequest| {
                    r.category.field_value()
                }),
                FieldDescriptor::new("description", None, "max=500", |r: &CreateExpenseRequest| {
                    r.description.field_value()
                }),
                FieldDescriptor::new(
                    "date",
                    None,
                    "required,datetime=YYYY-MM-DD",
                    |r: &CreateExpenseRequest| r.date.field_value(),
                ),
            ]
        });
        &FIELDS
    }
}

// Rules after `omitempty` on these optional fields are declared but do not
// fire: the evaluators only inspect plain strings and numbers. A partial
// update is checked for shape by the service instead (category, date).
impl Validatable for UpdateExpenseRequest {
    fn field_descriptors() -> &'static [FieldDescriptor<Self>] {
        static FIELDS: Lazy<Vec<FieldDescriptor<UpdateExpenseRequest>>> = Lazy::new(|| {
            vec![
                FieldDescriptor::new("amount", None, "omitempty,gt=0", |r: &UpdateExpenseRequest| {
                    r.amount.field_value()
                }),
                FieldDescriptor::new("category", None, "omitempty", |r: &UpdateExpenseRequest| {
                    r.category.field_value()
                }),
                FieldDescriptor::new(
                    "description",
                    None,
                    "omitempty,max=500",
                    |r: &UpdateExpenseRequest| r.description.field_value(),
                ),
                FieldDescriptor::new(
                    "date",
                    None,
                    "omitempty,datetime=YYYY-MM-DD",
                    |r: &UpdateExpenseRequest| r.date.field_value(),
                ),
            ]
        });
        &FIELDS
    }
}
