use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use wrapp_config::{
    descriptor::{Root, TypeDescriptor},
    errors::IntrospectionError,
    reflect::{Field, Property, Reflect},
    ConfigurationModule,
};
use wrapp_di::{DiBuilder, Qualifier};

/// Qualifiers used by the demo configuration
struct Qualifiers;
struct DatabaseUrl;
struct ListenPort;
struct ServiceName;

#[derive(Debug)]
struct DatabaseConfig {
    url: String,
    pool_size: u32,
}
impl Reflect for DatabaseConfig {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::value::<Self, _>("url", &self.url).qualified_with::<DatabaseUrl>(),
            Field::value::<Self, _>("pool_size", &self.pool_size),
        ]
    }
}

#[derive(Debug)]
struct HttpConfig {
    port: u16,
}
impl Reflect for HttpConfig {
    fn properties(&self) -> Result<Vec<Property<'_>>, IntrospectionError> {
        Ok(vec![Property::value("port", &self.port).qualified_with::<ListenPort>()])
    }
}

struct AppConfig {
    name: String,
    database: Arc<DatabaseConfig>,
    http: Arc<HttpConfig>,
}
impl Reflect for AppConfig {
    fn properties(&self) -> Result<Vec<Property<'_>>, IntrospectionError> {
        Ok(vec![
            Property::value("name", &self.name).qualified_with::<ServiceName>(),
            Property::shared("database", &self.database),
            Property::shared("http", &self.http),
        ])
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig {
        name: "demo-service".to_string(),
        database: Arc::new(DatabaseConfig {
            url: "postgres://localhost/demo".to_string(),
            pool_size: 8,
        }),
        http: Arc::new(HttpConfig { port: 8080 }),
    };

    let module = ConfigurationModule::new([
        Root::from(
            TypeDescriptor::class::<Qualifiers>()
                .declaring(TypeDescriptor::qualifier::<DatabaseUrl>())
                .declaring(TypeDescriptor::qualifier::<ListenPort>())
                .declaring(TypeDescriptor::qualifier::<ServiceName>()),
        ),
        Root::value(config),
    ]);

    let container = match DiBuilder::new().install(&module).build() {
        Ok(container) => container,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    println!("{:?}", container);

    let url = container.require_qualified::<String>(Qualifier::of::<DatabaseUrl>());
    let port = container.require_qualified::<u16>(Qualifier::of::<ListenPort>());
    let name = container.require_qualified::<String>(Qualifier::of::<ServiceName>());
    println!("name: {name:?}, url: {url:?}, port: {port:?}");
}
