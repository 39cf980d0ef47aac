// SPDX-License-Identifier: GPL-3.0-only

//! Canned registry trees
//!
//! Every tree has the shape bus → controller → block storage device → media.
//! Only the bus is in the device tree plane. The controller carries the
//! media icon and the device unit number.

use std::sync::Arc;

use arbitration_contracts::{DeviceRegistry, EntryId, Plane};
use arbitration_types::PropertyBag;
use arbitration_types::keys::{class, registry};

use crate::registry::{FakeEntry, FakeRegistry};

pub const SERVICE_ROOT: &str = "IOService:/AppleACPIPlatformExpert/PCI0@0/AppleACPIPCI/SATA@1F,2";

/// Media keys a hardware-backed disk cannot be built without
pub const REQUIRED_MEDIA_KEYS: &[&str] = &[
    registry::PREFERRED_BLOCK_SIZE,
    registry::BSD_NAME,
    registry::BSD_MAJOR,
    registry::BSD_MINOR,
    registry::BSD_UNIT,
    registry::CONTENT,
    registry::EJECTABLE,
    registry::ICON,
    registry::LEAF,
    registry::REMOVABLE,
    registry::SIZE,
    registry::WHOLE,
    registry::WRITABLE,
];

/// A registry holding one disk's ancestry
#[derive(Debug, Clone)]
pub struct DiskTree {
    pub registry: Arc<FakeRegistry>,
    pub bus: EntryId,
    pub controller: EntryId,
    pub device: EntryId,
    pub media: EntryId,
}

impl DiskTree {
    /// The registry as the builders take it
    pub fn provider(&self) -> Arc<dyn DeviceRegistry> {
        self.registry.clone()
    }

    pub fn media_path(&self) -> String {
        format!("{SERVICE_ROOT}/AppleAHCI/PRT0@0/IOAHCIDevice@0/Media")
    }
}

/// Media properties for a writable whole disk named `bsd_name`
pub fn media_properties(bsd_name: &str, removable: bool) -> PropertyBag {
    PropertyBag::new()
        .with(registry::BSD_NAME, bsd_name)
        .with(registry::BSD_MAJOR, 1_i64)
        .with(registry::BSD_MINOR, 8_i64)
        .with(registry::BSD_UNIT, 2_i64)
        .with(registry::PREFERRED_BLOCK_SIZE, 512_i64)
        .with(registry::CONTENT, "GUID_partition_scheme")
        .with(registry::EJECTABLE, removable)
        .with(registry::LEAF, true)
        .with(registry::REMOVABLE, removable)
        .with(registry::SIZE, 10_000_000_000_i64)
        .with(registry::WHOLE, true)
        .with(registry::WRITABLE, true)
}

fn protocol(location: &str, interconnect: &str) -> PropertyBag {
    PropertyBag::new()
        .with(registry::INTERCONNECT_LOCATION, location)
        .with(registry::INTERCONNECT_TYPE, interconnect)
}

fn icon() -> PropertyBag {
    PropertyBag::new()
        .with("CFBundleIdentifier", "com.apple.iokit.IOStorageFamily")
        .with("IOBundleResourceFile", "Internal.icns")
}

/// Build a tree whose device sits at `location` ("Internal" or "External")
pub fn disk_tree(media: PropertyBag, location: &str, interconnect: &str) -> DiskTree {
    let registry = Arc::new(FakeRegistry::new());

    let bus = registry.insert(
        FakeEntry::new()
            .name(Plane::Service, "PCI0")
            .name(Plane::DeviceTree, "PCI0")
            .path(Plane::Service, "IOService:/AppleACPIPlatformExpert/PCI0@0")
            .path(Plane::DeviceTree, "IODeviceTree:/PCI0@0"),
    );

    let controller = registry.insert(
        FakeEntry::new()
            .child_of(bus)
            .class("AppleAHCIPort")
            .name(Plane::Service, "PRT0")
            .path(Plane::Service, format!("{SERVICE_ROOT}/AppleAHCI/PRT0@0"))
            .property(registry::UNIT, 0_i64)
            .property(registry::ICON, icon()),
    );

    let device = registry.insert(
        FakeEntry::new()
            .child_of(controller)
            .class(class::BLOCK_STORAGE_DEVICE)
            .name(Plane::Service, "IOAHCIBlockStorageDevice")
            .path(
                Plane::Service,
                format!("{SERVICE_ROOT}/AppleAHCI/PRT0@0/IOAHCIDevice@0"),
            )
            .property(
                registry::PROTOCOL_CHARACTERISTICS,
                protocol(location, interconnect),
            )
            .property(
                registry::DEVICE_CHARACTERISTICS,
                PropertyBag::new()
                    .with(registry::PRODUCT_NAME, "APPLE SSD SM0512F")
                    .with(registry::PRODUCT_REVISION, "UXM2JA1Q")
                    .with(registry::VENDOR_NAME, "APPLE"),
            ),
    );

    let media_entry = registry.insert(
        FakeEntry::new()
            .child_of(device)
            .class(class::MEDIA)
            .name(Plane::Service, "APPLE SSD SM0512F Media")
            .path(
                Plane::Service,
                format!("{SERVICE_ROOT}/AppleAHCI/PRT0@0/IOAHCIDevice@0/Media"),
            )
            .properties(media),
    );

    DiskTree {
        registry,
        bus,
        controller,
        device,
        media: media_entry,
    }
}

/// Internal, fixed, generic whole disk `disk2` with no ownership hints
pub fn sample_whole_disk() -> DiskTree {
    disk_tree(media_properties("disk2", false), registry::LOCATION_INTERNAL, "SATA")
}

/// Removable card reader media on an external USB device
pub fn removable_external_disk() -> DiskTree {
    disk_tree(media_properties("disk5", true), registry::LOCATION_EXTERNAL, "USB")
}
