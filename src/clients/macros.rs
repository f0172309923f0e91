/// Generate client methods with oneshot channel boilerplate and automatic tracing.
///
/// Parameter names must match the fields of the request variant.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> $crate::error::Result<$return_type> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| $crate::error::ShopError::ActorCommunication("Actor closed".to_string()))?;

                response
                    .await
                    .map_err(|_| $crate::error::ShopError::ActorCommunication("Actor dropped".to_string()))?
            }
        }
    };
}

/// Generate `list_<collection>` methods, each answered by the matching `List<Collection>` request.
macro_rules! impl_list_methods {
    ($client:ty, $request:ident { $($collection:ident => $entity:ty),* $(,)? }) => {
        paste::paste! {
            $(
                client_method!($client => fn [<list_ $collection>]() -> Vec<$entity> as $request::[<List $collection:camel>]);
            )*
        }
    };
}
