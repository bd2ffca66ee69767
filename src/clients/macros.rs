/// Generates a client method that sends one request variant and awaits its
/// oneshot reply, with tracing on every call.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $crate::error::ServiceError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| $crate::error::ServiceError::Closed)?;

                response.await.map_err(|_| $crate::error::ServiceError::Dropped)
            }
        }
    };
}

/// Generates the `shutdown` method every service client carries.
macro_rules! client_shutdown {
    ($client:ty => $request:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn shutdown(&self) -> Result<(), $crate::error::ServiceError> {
                tracing::debug!("Sending shutdown request");
                self.sender
                    .send($request::Shutdown)
                    .await
                    .map_err(|_| $crate::error::ServiceError::Closed)
            }
        }
    };
}
