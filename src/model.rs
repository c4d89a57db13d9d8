use serde::{Deserialize, Serialize};

/// Attribute holding the table's numeric hash key.
pub const CLIENT_ID_ATTR: &str = "ClientID";

/// A client as stored in the `Clients` table. Field names on the wire
/// are the attribute names the table has always used.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    #[serde(rename = "ClientID")]
    pub client_id: i64,
    #[serde(rename = "Client Name")]
    pub business_name: String,
    #[serde(rename = "Point of Contact")]
    pub point_of_contact: String,
    #[serde(rename = "E-mail")]
    pub email: String,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
}
