use std::time::Duration;

/// The default endpoint for the catering menu service
pub const DEFAULT_MENU_SERVICE_URL: &str = "http://test.api.catering.bluecodegames.com/menu";

/// The shop the menu is requested for when none is configured
pub const DEFAULT_SHOP_ID: &str = "1";

/// Request body field carrying the shop identifier
pub const SHOP_ID_FIELD: &str = "id_shop";

/// How long a cached menu response is served before going back to the network
pub const CACHE_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7);

/// Suffix appended to prices on display
pub const CURRENCY_SYMBOL: &str = "€";
