/// Generates the dependency trait and the service struct for a service
/// implementation. Each service is generic over a single `Deps` type that
/// names its context, transaction and collaborator types, so the binary can
/// wire concrete implementations with one small struct per service.
#[macro_export]
macro_rules! gen_service_impl {
    (
        struct $service_name:ident : $trait:path = $dependencies:ident {
            $($field_name:ident: $field_type:path = $field_attr:ident),* $(,)?
        }
    ) => {
            pub trait $dependencies {
                type Context: Send + Sync + Clone + Eq + std::fmt::Debug + 'static;
                type Transaction: dao::Transaction + Send + Sync + Clone + std::fmt::Debug + 'static;
                $(
                    type $field_name: $field_type + Sync + Send;
                )*
            }

            pub struct $service_name<Deps: $dependencies> {
                $(
                    pub $field_attr: std::sync::Arc<Deps::$field_name>,
                )*
            }

            impl<Deps: $dependencies> $service_name<Deps> {
                #[allow(clippy::too_many_arguments)]
                pub fn new($($field_attr: std::sync::Arc<Deps::$field_name>),*) -> Self {
                    Self {
                        $($field_attr),*
                    }
                }
            }
    };
}
