// SPDX-License-Identifier: GPL-3.0-only

//! Disk construction from a block-storage media registry entry

use std::sync::Arc;

use arbitration_contracts::{Ancestor, DeviceRegistry, EntryId, IdentityLookup, Plane};
use arbitration_types::keys::{class, description, registry};
use arbitration_types::{
    ArbitrationConfig, DeviceNumber, DiskOption, MediaKind, PropertyBag, PropertyValue,
};
use chrono::Utc;

use crate::disk::Disk;
use crate::error::{ConstructionCause, DiskError};
use crate::handle::DeviceHandle;
use crate::ownership::{OwnershipFacts, OwnershipResolver};
use crate::text::{decode_name, decode_utf8};

type Step<T> = Result<T, ConstructionCause>;

/// Media properties copied verbatim into the description, in order
const MEDIA_FACTS: &[(&str, &str)] = &[
    (registry::PREFERRED_BLOCK_SIZE, description::MEDIA_BLOCK_SIZE),
    (registry::BSD_NAME, description::MEDIA_BSD_NAME),
];

const MEDIA_FLAGS: &[(&str, &str)] = &[
    (registry::CONTENT, description::MEDIA_CONTENT),
    (registry::EJECTABLE, description::MEDIA_EJECTABLE),
];

const MEDIA_TRAILING_FACTS: &[(&str, &str)] = &[
    (registry::REMOVABLE, description::MEDIA_REMOVABLE),
    (registry::SIZE, description::MEDIA_SIZE),
    (registry::WHOLE, description::MEDIA_WHOLE),
    (registry::WRITABLE, description::MEDIA_WRITABLE),
];

const DEVICE_CHARACTERISTICS: &[(&str, &str)] = &[
    (registry::PRODUCT_NAME, description::DEVICE_MODEL),
    (registry::PRODUCT_REVISION, description::DEVICE_REVISION),
    (registry::VENDOR_NAME, description::DEVICE_VENDOR),
];

/// Builds disks from hardware registry entries
///
/// Construction blocks on registry queries. Any required fact that is
/// missing aborts the attempt; references taken so far are released as the
/// partial disk and scoped handles drop.
pub struct HardwareDiskBuilder {
    registry: Arc<dyn DeviceRegistry>,
    ownership: OwnershipResolver,
    config: ArbitrationConfig,
}

impl HardwareDiskBuilder {
    pub fn new(registry: Arc<dyn DeviceRegistry>, users: Arc<dyn IdentityLookup>) -> Self {
        Self::with_config(registry, users, ArbitrationConfig::default())
    }

    pub fn with_config(
        registry: Arc<dyn DeviceRegistry>,
        users: Arc<dyn IdentityLookup>,
        config: ArbitrationConfig,
    ) -> Self {
        Self {
            registry,
            ownership: OwnershipResolver::new(config.identity.clone(), users),
            config,
        }
    }

    pub fn build(&self, media: EntryId) -> Result<Disk, DiskError> {
        self.assemble(media).map_err(|cause| {
            let path = self
                .registry
                .path(media, Plane::Service)
                .ok()
                .map(|raw| decode_name(&raw));

            tracing::error!(
                "unable to create disk, path = {}: {}",
                path.as_deref().unwrap_or("<anonymous>"),
                cause
            );

            DiskError::Construction { path, cause }
        })
    }

    fn assemble(&self, media: EntryId) -> Step<Disk> {
        let properties = self.registry.properties(media)?;

        let bsd_name = properties
            .get(registry::BSD_NAME)
            .ok_or(ConstructionCause::MissingProperty(registry::BSD_NAME))?
            .as_str()
            .filter(|name| !name.is_empty())
            .ok_or(ConstructionCause::InvalidProperty {
                key: registry::BSD_NAME,
                expected: "a non-empty string",
            })?;

        let device_path = self.config.device_path(bsd_name);
        let mut disk = Disk::new(device_path.clone(), &self.config.identity);
        disk.set_device_paths(device_path, self.config.raw_device_path(bsd_name));
        disk.attach_device(DeviceHandle::retain(self.registry.clone(), media));

        let mut bag = PropertyBag::new();
        bag.insert(description::VOLUME_NETWORK, false);

        copy_required(&properties, &mut bag, MEDIA_FACTS)?;

        let major = required_u32(&properties, registry::BSD_MAJOR)?;
        let minor = required_u32(&properties, registry::BSD_MINOR)?;
        bag.insert(description::MEDIA_BSD_MAJOR, major);
        bag.insert(description::MEDIA_BSD_MINOR, minor);
        disk.set_device_number(DeviceNumber { major, minor });

        let unit = required_integer(&properties, registry::BSD_UNIT)?;
        bag.insert(description::MEDIA_BSD_UNIT, unit);
        disk.set_bsd_unit(unit);

        copy_required(&properties, &mut bag, MEDIA_FLAGS)?;

        let icon = self
            .registry
            .search_upward(media, registry::ICON)
            .ok_or(ConstructionCause::MissingProperty(registry::ICON))?;
        bag.insert(description::MEDIA_ICON, icon);

        let kind = self.media_kind(media);
        bag.insert(description::MEDIA_KIND, kind.class_name());
        if kind.has_media_type() {
            copy_required(
                &properties,
                &mut bag,
                &[(registry::MEDIA_TYPE, description::MEDIA_TYPE)],
            )?;
        }

        copy_required(
            &properties,
            &mut bag,
            &[(registry::LEAF, description::MEDIA_LEAF)],
        )?;

        let name = self.registry.name(media, Plane::Service)?;
        bag.insert(description::MEDIA_NAME, decode_name(&name));

        let media_path = self
            .registry
            .path(media, Plane::DeviceTree)
            .or_else(|_| self.registry.path(media, Plane::Service))?;
        bag.insert(description::MEDIA_PATH, decode_name(&media_path));

        copy_required(&properties, &mut bag, MEDIA_TRAILING_FACTS)?;

        let device = self
            .registry
            .find_ancestor(media, Ancestor::ConformsTo(class::BLOCK_STORAGE_DEVICE))
            .map(|entry| DeviceHandle::retain(self.registry.clone(), entry))
            .ok_or(ConstructionCause::MissingBlockStorageDevice)?;

        self.describe_device(&device, &mut bag)?;
        self.describe_bus(&device, &mut bag)?;

        bag.insert(description::APPEARANCE_TIME, appearance_time());

        match self.registry.search_upward(media, registry::AUTO_MOUNT) {
            None => disk.set_option(DiskOption::MountAutomatic, true),
            Some(PropertyValue::Bool(true)) => disk.set_options(
                DiskOption::MountAutomatic | DiskOption::MountAutomaticNoDefer,
                true,
            ),
            Some(_) => {}
        }

        let eject_upon_logout = self
            .registry
            .search_upward(device.entry(), registry::EJECT_UPON_LOGOUT);
        if eject_upon_logout == Some(PropertyValue::Bool(true)) {
            disk.set_option(DiskOption::EjectUponLogout, true);
        }

        let facts = OwnershipFacts {
            removable: bag.get_bool(description::MEDIA_REMOVABLE),
            internal: bag.get_bool(description::DEVICE_INTERNAL),
            owner_uid: self
                .registry
                .search_upward(device.entry(), registry::OWNER_UID),
            owner_mode: self
                .registry
                .search_upward(device.entry(), registry::OWNER_MODE),
        };
        *disk.security_mut() = self.ownership.resolve(&facts);

        disk.update_description(|target| target.extend(bag));

        tracing::debug!("created disk {} from registry entry {:?}", disk.id(), media);

        Ok(disk)
    }

    fn media_kind(&self, media: EntryId) -> MediaKind {
        if self.registry.conforms_to(media, class::DVD_MEDIA) {
            MediaKind::Dvd
        } else if self.registry.conforms_to(media, class::CD_MEDIA) {
            MediaKind::Cd
        } else {
            MediaKind::Generic
        }
    }

    /// Device-level facts from the nearest block storage device
    fn describe_device(&self, device: &DeviceHandle, bag: &mut PropertyBag) -> Step<()> {
        let properties = device.properties()?;

        if let Some(protocol) = properties.get_bag(registry::PROTOCOL_CHARACTERISTICS) {
            match protocol.get_str(registry::INTERCONNECT_LOCATION) {
                Some(registry::LOCATION_INTERNAL) => {
                    bag.insert(description::DEVICE_INTERNAL, true);
                }
                Some(registry::LOCATION_EXTERNAL) => {
                    bag.insert(description::DEVICE_INTERNAL, false);
                }
                _ => {}
            }

            if let Some(interconnect) = protocol.get(registry::INTERCONNECT_TYPE) {
                bag.insert(description::DEVICE_PROTOCOL, interconnect.clone());
            }
        }

        if let Some(characteristics) = properties.get_bag(registry::DEVICE_CHARACTERISTICS) {
            copy_present(characteristics, bag, DEVICE_CHARACTERISTICS);
        }

        let path = self.registry.path(device.entry(), Plane::Service)?;
        let path = decode_utf8(&path).ok_or(ConstructionCause::InvalidProperty {
            key: description::DEVICE_PATH,
            expected: "a UTF-8 registry path",
        })?;
        bag.insert(description::DEVICE_PATH, path);

        match self.registry.search_upward(device.entry(), registry::UNIT) {
            Some(unit) => {
                bag.insert(description::DEVICE_UNIT, unit);
            }
            None => tracing::debug!("no unit number above {:?}", device.entry()),
        }

        match self.registry.search_upward(device.entry(), registry::GUID) {
            Some(PropertyValue::Integer(guid)) => {
                // EUI-64, stored in network byte order
                bag.insert(description::DEVICE_GUID, (guid as u64).to_be_bytes().to_vec());
            }
            Some(other) => tracing::debug!("ignoring non-integer GUID {:?}", other),
            None => {}
        }

        Ok(())
    }

    /// Bus facts from the first ancestor present in the device tree plane
    fn describe_bus(&self, device: &DeviceHandle, bag: &mut PropertyBag) -> Step<()> {
        let Some(bus) = self
            .registry
            .find_ancestor(device.entry(), Ancestor::InPlane(Plane::DeviceTree))
        else {
            tracing::debug!("no device tree ancestor above {:?}", device.entry());
            return Ok(());
        };
        let bus = DeviceHandle::retain(self.registry.clone(), bus);

        let name = self.registry.name(bus.entry(), Plane::DeviceTree)?;
        let name = decode_utf8(&name).ok_or(ConstructionCause::InvalidProperty {
            key: description::BUS_NAME,
            expected: "a UTF-8 name",
        })?;
        bag.insert(description::BUS_NAME, name);

        let path = self.registry.path(bus.entry(), Plane::DeviceTree)?;
        let path = decode_utf8(&path).ok_or(ConstructionCause::InvalidProperty {
            key: description::BUS_PATH,
            expected: "a UTF-8 registry path",
        })?;
        bag.insert(description::BUS_PATH, path);

        Ok(())
    }
}

fn copy_required(
    source: &PropertyBag,
    target: &mut PropertyBag,
    keys: &[(&'static str, &str)],
) -> Step<()> {
    for &(from, to) in keys {
        let value = source
            .get(from)
            .ok_or(ConstructionCause::MissingProperty(from))?;
        target.insert(to, value.clone());
    }
    Ok(())
}

fn copy_present(source: &PropertyBag, target: &mut PropertyBag, keys: &[(&str, &str)]) {
    for &(from, to) in keys {
        if let Some(value) = source.get(from) {
            target.insert(to, value.clone());
        }
    }
}

fn required_integer(source: &PropertyBag, key: &'static str) -> Step<i64> {
    source
        .get(key)
        .ok_or(ConstructionCause::MissingProperty(key))?
        .as_integer()
        .ok_or(ConstructionCause::InvalidProperty {
            key,
            expected: "an integer",
        })
}

fn required_u32(source: &PropertyBag, key: &'static str) -> Step<u32> {
    u32::try_from(required_integer(source, key)?).map_err(|_| {
        ConstructionCause::InvalidProperty {
            key,
            expected: "a 32-bit unsigned integer",
        }
    })
}

/// Seconds since the Unix epoch, with microsecond precision
fn appearance_time() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
