// Message and client types for `proto/ace.proto` (package `ace`).
//
// Checked in rather than produced by a build script so the gateway builds
// without `protoc`. Keep in sync with the .proto file.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SyllabusRequest {
    #[prost(string, tag = "1")]
    pub file_name: ::prost::alloc::string::String,
    #[prost(bytes = "vec", tag = "2")]
    pub file_data: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SyllabusResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
    #[prost(int32, tag = "3")]
    pub nodes_created: i32,
    #[prost(string, tag = "4")]
    pub graph_json: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChatRequest {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChatResponse {
    #[prost(string, tag = "1")]
    pub response: ::prost::alloc::string::String,
}

pub mod tutor_service_client {
    use tonic::codegen::*;

    /// Client for `ace.TutorService`.
    #[derive(Debug, Clone)]
    pub struct TutorServiceClient<T> {
        inner: tonic::client::Grpc<T>,
    }

    impl<T> TutorServiceClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::Error: Into<StdError>,
        T::ResponseBody: Body<Data = Bytes> + std::marker::Send + 'static,
        <T::ResponseBody as Body>::Error: Into<StdError> + std::marker::Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }

        pub async fn process_syllabus(
            &mut self,
            request: impl tonic::IntoRequest<super::SyllabusRequest>,
        ) -> std::result::Result<tonic::Response<super::SyllabusResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ace.TutorService/ProcessSyllabus");
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("ace.TutorService", "ProcessSyllabus"));
            self.inner.unary(req, path, codec).await
        }

        pub async fn chat(
            &mut self,
            request: impl tonic::IntoRequest<super::ChatRequest>,
        ) -> std::result::Result<tonic::Response<super::ChatResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/ace.TutorService/Chat");
            let mut req = request.into_request();
            req.extensions_mut()
                .insert(GrpcMethod::new("ace.TutorService", "Chat"));
            self.inner.unary(req, path, codec).await
        }
    }
}
