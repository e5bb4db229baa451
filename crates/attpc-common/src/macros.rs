/// Generates a getter that returns a `Vec<f64>` field as an [`ndarray::Array1<f64>`].
#[macro_export]
macro_rules! array1d_getter_impl {
    ($fun_name:ident, $field:ident) => {
        #[doc = "Returns the `"]
        #[doc = stringify!($field)]
        #[doc = "` series as an `Array1<f64>`."]
        pub fn $fun_name(&self) -> ndarray::Array1<f64> {
            ndarray::Array1::from(self.$field.clone())
        }
    };
}
